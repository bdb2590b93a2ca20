/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
[UPDATE]: 2026-10-19 accept null bids/asks/fills and numeric or string order ids
*/

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Direction, OrderType};

/// Server-assigned order identifier.
///
/// The exchange sends ids as JSON numbers; some proxies re-encode them as
/// strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_helpers::deserialize_id(deserializer).map(OrderId)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    #[serde(default)]
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueHeartbeat {
    pub venue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub venue: String,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueListing {
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub venues: Vec<Venue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockListing {
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookLevel {
    pub price: u64,
    pub qty: u64,
    pub is_buy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    pub venue: String,
    pub symbol: String,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub bids: Vec<BookLevel>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub asks: Vec<BookLevel>,
    pub ts: DateTime<Utc>,
}

/// Point-in-time quote. Prices are integer cents; sides with no resting
/// orders are omitted by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub venue: String,
    pub symbol: String,
    #[serde(default)]
    pub bid: Option<u64>,
    #[serde(default)]
    pub bid_size: u64,
    #[serde(default)]
    pub bid_depth: u64,
    #[serde(default)]
    pub ask: Option<u64>,
    #[serde(default)]
    pub ask_size: u64,
    #[serde(default)]
    pub ask_depth: u64,
    #[serde(default)]
    pub last: Option<u64>,
    #[serde(default)]
    pub last_size: Option<u64>,
    #[serde(default)]
    pub last_trade: Option<DateTime<Utc>>,
    pub quote_time: DateTime<Utc>,
}

impl Quote {
    /// Ask minus bid, when both sides are present.
    pub fn spread(&self) -> Option<u64> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub price: u64,
    pub qty: u64,
    pub ts: DateTime<Utc>,
}

/// State of a single order as reported by the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    pub id: OrderId,
    pub venue: String,
    pub symbol: String,
    pub direction: Direction,
    pub original_qty: u64,
    #[serde(default)]
    pub qty: u64,
    #[serde(default)]
    pub price: u64,
    pub order_type: OrderType,
    pub account: String,
    pub ts: DateTime<Utc>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub fills: Vec<Fill>,
    #[serde(default)]
    pub total_filled: u64,
    pub open: bool,
}

impl OrderStatus {
    /// Quantity executed so far, summed over fills.
    pub fn filled_qty(&self) -> u64 {
        self.fills.iter().map(|fill| fill.qty).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountOrders {
    pub venue: String,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub orders: Vec<OrderStatus>,
}

/// Level instance returned when a level is started, restarted or resumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInstance {
    pub instance_id: u64,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub instructions: HashMap<String, String>,
    #[serde(default)]
    pub seconds_per_trading_day: u64,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub tickers: Vec<String>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_default")]
    pub venues: Vec<String>,
    #[serde(default)]
    pub balances: HashMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDetails {
    #[serde(default)]
    pub end_of_the_world_day: u64,
    #[serde(default)]
    pub trading_day: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStatus {
    pub id: u64,
    #[serde(default)]
    pub done: bool,
    pub state: String,
    #[serde(default)]
    pub details: Option<LevelDetails>,
    #[serde(default)]
    pub flash: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub error: String,
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(raw) if !raw.trim().is_empty() => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            _ => Err(serde::de::Error::custom("invalid order id")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_status_deserializes_null_fills() {
        let value = json!({
            "ok": true,
            "symbol": "FOOBAR",
            "venue": "TESTEX",
            "direction": "buy",
            "originalQty": 100,
            "qty": 100,
            "price": 5100,
            "orderType": "limit",
            "id": 12345,
            "account": "EXB123456",
            "ts": "2015-12-04T09:02:16.680986205Z",
            "fills": null,
            "totalFilled": 0,
            "open": true
        });

        let order: OrderStatus = serde_json::from_value(value).expect("order should deserialize");

        assert_eq!(order.id, OrderId::from(12345));
        assert!(order.fills.is_empty());
        assert_eq!(order.filled_qty(), 0);
        assert!(order.open);
    }

    #[test]
    fn fills_keep_execution_order() {
        let value = json!({
            "symbol": "FOOBAR",
            "venue": "TESTEX",
            "direction": "sell",
            "originalQty": 10,
            "price": 2375,
            "orderType": "limit",
            "id": "77",
            "account": "EXB123456",
            "ts": "2015-12-04T09:02:16Z",
            "fills": [
                { "price": 2400, "qty": 3, "ts": "2015-12-04T09:02:17Z" },
                { "price": 2380, "qty": 5, "ts": "2015-12-04T09:02:18Z" }
            ],
            "totalFilled": 8,
            "open": true
        });

        let order: OrderStatus = serde_json::from_value(value).expect("order should deserialize");

        assert_eq!(order.id.as_str(), "77");
        let prices: Vec<u64> = order.fills.iter().map(|fill| fill.price).collect();
        assert_eq!(prices, vec![2400, 2380]);
        assert_eq!(order.filled_qty(), 8);
    }

    #[test]
    fn orderbook_accepts_null_sides() {
        let value = json!({
            "venue": "TESTEX",
            "symbol": "FOOBAR",
            "bids": [{ "price": 5100, "qty": 10, "isBuy": true }],
            "asks": null,
            "ts": "2015-12-04T09:02:16.680986205Z"
        });

        let book: Orderbook = serde_json::from_value(value).expect("book should deserialize");

        assert_eq!(book.bids.len(), 1);
        assert!(book.bids[0].is_buy);
        assert!(book.asks.is_empty());
    }

    #[test]
    fn quote_without_asks_has_no_spread() {
        let value = json!({
            "symbol": "FOOBAR",
            "venue": "TESTEX",
            "bid": 5100,
            "bidSize": 392,
            "bidDepth": 2748,
            "askSize": 0,
            "askDepth": 0,
            "last": 5125,
            "lastSize": 52,
            "lastTrade": "2015-07-13T05:38:17.33640392Z",
            "quoteTime": "2015-07-13T05:38:17.33640392Z"
        });

        let quote: Quote = serde_json::from_value(value).expect("quote should deserialize");

        assert_eq!(quote.bid, Some(5100));
        assert_eq!(quote.ask, None);
        assert_eq!(quote.spread(), None);
    }

    #[test]
    fn order_id_rejects_empty_string() {
        assert!(serde_json::from_value::<OrderId>(json!("")).is_err());
        assert!(serde_json::from_value::<OrderId>(json!(true)).is_err());
    }
}
