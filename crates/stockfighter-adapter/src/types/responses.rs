/*
[INPUT]:  Parsed JSON response bodies
[OUTPUT]: Outcome envelope separating business rejections from payloads
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use crate::http::{Result, StockfighterError};

/// `{ "ok": false, "error": "..." }` body the exchange uses for expected
/// business failures (unknown venue, bad order, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: String,
}

/// Result of a call that reached the exchange and produced a JSON body.
///
/// `Success` corresponds to `ok: true`, `Rejected` to `ok: false`. Rejections
/// are values, not errors; use [`Outcome::into_result`] to fold them into
/// [`StockfighterError::Api`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Rejected(ApiError),
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&ApiError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Rejected(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Rejected(err) => Outcome::Rejected(err),
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Rejected(err) => Err(StockfighterError::Api { message: err.error }),
        }
    }
}
