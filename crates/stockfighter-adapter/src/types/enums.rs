/*
[INPUT]:  Order and stream vocabulary of the Stockfighter API
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    Limit,
    Market,
    FillOrKill,
    ImmediateOrCancel,
}

impl OrderType {
    /// Whether orders of this type must carry a limit price.
    pub fn requires_price(&self) -> bool {
        !matches!(self, OrderType::Market)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
            OrderType::FillOrKill => "fill-or-kill",
            OrderType::ImmediateOrCancel => "immediate-or-cancel",
        }
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "limit" => Ok(OrderType::Limit),
            "market" => Ok(OrderType::Market),
            "fill-or-kill" | "fok" => Ok(OrderType::FillOrKill),
            "immediate-or-cancel" | "ioc" => Ok(OrderType::ImmediateOrCancel),
            other => Err(format!("unknown order type: {other}")),
        }
    }
}

/// Which real-time channel a subscription listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    #[default]
    Tickertape,
    Executions,
}

impl StreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Tickertape => "tickertape",
            StreamKind::Executions => "executions",
        }
    }
}

impl std::str::FromStr for StreamKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tickertape" => Ok(StreamKind::Tickertape),
            "executions" => Ok(StreamKind::Executions),
            other => Err(format!("unknown stream kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::FillOrKill).unwrap(),
            "\"fill-or-kill\""
        );
        assert_eq!(
            serde_json::from_str::<OrderType>("\"immediate-or-cancel\"").unwrap(),
            OrderType::ImmediateOrCancel
        );
        assert_eq!("ioc".parse::<OrderType>().unwrap(), OrderType::ImmediateOrCancel);
        assert!("stop".parse::<OrderType>().is_err());
    }

    #[test]
    fn only_market_orders_skip_price() {
        assert!(!OrderType::Market.requires_price());
        assert!(OrderType::Limit.requires_price());
        assert!(OrderType::FillOrKill.requires_price());
        assert!(OrderType::ImmediateOrCancel.requires_price());
    }

    #[test]
    fn stream_kind_defaults_to_tickertape() {
        assert_eq!(StreamKind::default(), StreamKind::Tickertape);
        assert_eq!("executions".parse::<StreamKind>().unwrap(), StreamKind::Executions);
    }
}
