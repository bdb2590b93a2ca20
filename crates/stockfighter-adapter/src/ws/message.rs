/*
[INPUT]:  Raw WebSocket text frames
[OUTPUT]: Parsed stream messages and subscription events
[POS]:    WebSocket layer - message parsing and validation
[UPDATE]: When adding new message types or changing format
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{OrderId, OrderStatus, Quote, StreamKind};

/// Tickertape frame: one quote update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickertapeMessage {
    pub ok: bool,
    pub quote: Quote,
}

/// Executions frame: one fill against one of the account's orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub ok: bool,
    pub account: String,
    pub venue: String,
    pub symbol: String,
    pub order: OrderStatus,
    pub standing_id: OrderId,
    pub incoming_id: OrderId,
    pub price: u64,
    pub filled: u64,
    pub filled_at: DateTime<Utc>,
    pub standing_complete: bool,
    pub incoming_complete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StreamMessage {
    Quote(TickertapeMessage),
    Execution(ExecutionReport),
}

impl StreamMessage {
    /// Decode a text frame according to the subscription's stream kind.
    pub fn decode(kind: StreamKind, text: &str) -> Result<Self, StreamError> {
        let decoded = match kind {
            StreamKind::Tickertape => serde_json::from_str(text).map(StreamMessage::Quote),
            StreamKind::Executions => serde_json::from_str(text).map(StreamMessage::Execution),
        };
        decoded.map_err(|err| StreamError::Malformed {
            reason: err.to_string(),
            raw: text.to_string(),
        })
    }

    pub fn ok(&self) -> bool {
        match self {
            StreamMessage::Quote(message) => message.ok,
            StreamMessage::Execution(report) => report.ok,
        }
    }

    pub fn venue(&self) -> &str {
        match self {
            StreamMessage::Quote(message) => &message.quote.venue,
            StreamMessage::Execution(report) => &report.venue,
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            StreamMessage::Quote(message) => &message.quote.symbol,
            StreamMessage::Execution(report) => &report.symbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The socket could not be opened
    #[error("connect failed: {0}")]
    Connect(String),
    /// The open socket failed; the subscription is closed afterwards
    #[error("stream transport failed: {0}")]
    Transport(String),
    /// A frame could not be decoded; the subscription stays open
    #[error("undecodable frame: {reason}")]
    Malformed { reason: String, raw: String },
}

/// Everything a subscription reports to its consumer, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Open,
    Message(StreamMessage),
    Error(StreamError),
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKERTAPE_FRAME: &str = r#"{
        "ok": true,
        "quote": {
            "symbol": "FOOBAR",
            "venue": "TESTEX",
            "bid": 2766,
            "ask": 2799,
            "bidSize": 7,
            "askSize": 10,
            "bidDepth": 30,
            "askDepth": 40,
            "last": 2766,
            "lastSize": 13,
            "lastTrade": "2015-12-09T09:07:28.313711945Z",
            "quoteTime": "2015-12-09T09:07:28.313718082Z"
        }
    }"#;

    const EXECUTION_FRAME: &str = r#"{
        "ok": true,
        "account": "EXB123456",
        "venue": "TESTEX",
        "symbol": "FOOBAR",
        "order": {
            "ok": true,
            "symbol": "FOOBAR",
            "venue": "TESTEX",
            "direction": "buy",
            "originalQty": 10,
            "qty": 0,
            "price": 5142,
            "orderType": "limit",
            "id": 1234,
            "account": "EXB123456",
            "ts": "2015-12-09T09:07:28.313711945Z",
            "fills": [{ "price": 5100, "qty": 10, "ts": "2015-12-09T09:07:28.313711945Z" }],
            "totalFilled": 10,
            "open": false
        },
        "standingId": 1200,
        "incomingId": 1234,
        "price": 5100,
        "filled": 10,
        "filledAt": "2015-12-09T09:07:28.313711945Z",
        "standingComplete": false,
        "incomingComplete": true
    }"#;

    #[test]
    fn decodes_tickertape_quote() {
        let message = StreamMessage::decode(StreamKind::Tickertape, TICKERTAPE_FRAME).expect("decode");
        assert!(message.ok());
        assert_eq!(message.venue(), "TESTEX");
        assert_eq!(message.symbol(), "FOOBAR");
        match message {
            StreamMessage::Quote(tick) => assert_eq!(tick.quote.spread(), Some(33)),
            other => panic!("expected quote, got {other:?}"),
        }
    }

    #[test]
    fn decodes_execution_report() {
        let message = StreamMessage::decode(StreamKind::Executions, EXECUTION_FRAME).expect("decode");
        match message {
            StreamMessage::Execution(report) => {
                assert_eq!(report.incoming_id, OrderId::from(1234));
                assert_eq!(report.order.fills.len(), 1);
                assert!(report.incoming_complete);
                assert!(!report.order.open);
            }
            other => panic!("expected execution, got {other:?}"),
        }
    }

    #[test]
    fn frame_for_other_kind_is_malformed() {
        let err = StreamMessage::decode(StreamKind::Executions, TICKERTAPE_FRAME)
            .expect_err("tickertape frame is not an execution");
        match err {
            StreamError::Malformed { raw, .. } => assert!(raw.contains("quoteTime")),
            other => panic!("expected malformed, got {other:?}"),
        }
    }
}
