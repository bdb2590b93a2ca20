/*
[INPUT]:  Caller-supplied order parameters
[OUTPUT]: Validated order requests and their JSON wire bodies
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{Direction, OrderType};
use crate::http::{Result, StockfighterError};

/// Order parameters supplied by the caller. The direction is fixed by the
/// client operation used (`buy` / `sell`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Trading account; the client's held account is used when absent.
    pub account: Option<String>,
    pub venue: String,
    pub stock: String,
    /// Limit price in cents. Ignored for market orders.
    pub price: Option<u64>,
    pub quantity: u64,
    pub order_type: OrderType,
}

impl OrderRequest {
    pub fn limit(venue: impl Into<String>, stock: impl Into<String>, price: u64, quantity: u64) -> Self {
        Self {
            account: None,
            venue: venue.into(),
            stock: stock.into(),
            price: Some(price),
            quantity,
            order_type: OrderType::Limit,
        }
    }

    pub fn market(venue: impl Into<String>, stock: impl Into<String>, quantity: u64) -> Self {
        Self {
            account: None,
            venue: venue.into(),
            stock: stock.into(),
            price: None,
            quantity,
            order_type: OrderType::Market,
        }
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Check the request before any network I/O.
    pub fn validate(&self) -> Result<()> {
        if self.venue.trim().is_empty() {
            return Err(StockfighterError::validation("venue", "must not be empty"));
        }
        if self.stock.trim().is_empty() {
            return Err(StockfighterError::validation("stock", "must not be empty"));
        }
        if self.quantity == 0 {
            return Err(StockfighterError::validation("quantity", "must be greater than zero"));
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return Err(StockfighterError::validation(
                "price",
                format!("required for {} orders", self.order_type.as_str()),
            ));
        }
        if let Some(account) = &self.account
            && account.trim().is_empty()
        {
            return Err(StockfighterError::validation("account", "must not be empty"));
        }
        Ok(())
    }
}

/// JSON body of `POST /venues/:venue/stocks/:stock/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody<'a> {
    pub account: &'a str,
    pub venue: &'a str,
    pub stock: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    pub qty: u64,
    pub direction: Direction,
    pub order_type: OrderType,
}

impl<'a> OrderBody<'a> {
    pub fn new(request: &'a OrderRequest, account: &'a str, direction: Direction) -> Self {
        let price = if request.order_type.requires_price() {
            request.price
        } else {
            None
        };
        Self {
            account,
            venue: &request.venue,
            stock: &request.stock,
            price,
            qty: request.quantity,
            direction,
            order_type: request.order_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn limit_body_carries_price() {
        let request = OrderRequest::limit("TESTEX", "FOOBAR", 5142, 10);
        let body = OrderBody::new(&request, "EXB123456", Direction::Buy);

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "account": "EXB123456",
                "venue": "TESTEX",
                "stock": "FOOBAR",
                "price": 5142,
                "qty": 10,
                "direction": "buy",
                "orderType": "limit"
            })
        );
    }

    #[test]
    fn market_body_omits_price_even_when_supplied() {
        let mut request = OrderRequest::market("TESTEX", "FOOBAR", 1);
        request.price = Some(9999);
        let body = serde_json::to_value(OrderBody::new(&request, "EXB123456", Direction::Sell)).unwrap();

        assert!(body.get("price").is_none());
        assert_eq!(body["orderType"], "market");
        assert_eq!(body["direction"], "sell");
    }

    #[rstest]
    #[case(OrderRequest::limit("", "FOOBAR", 100, 1), "venue")]
    #[case(OrderRequest::limit("TESTEX", " ", 100, 1), "stock")]
    #[case(OrderRequest::limit("TESTEX", "FOOBAR", 100, 0), "quantity")]
    #[case(OrderRequest::market("TESTEX", "FOOBAR", 5).with_order_type(OrderType::FillOrKill), "price")]
    #[case(OrderRequest::market("TESTEX", "FOOBAR", 5).with_account(""), "account")]
    fn invalid_requests_name_the_field(#[case] request: OrderRequest, #[case] expected: &str) {
        match request.validate() {
            Err(StockfighterError::Validation { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn market_order_needs_no_price() {
        assert!(OrderRequest::market("TESTEX", "FOOBAR", 1).validate().is_ok());
    }
}
