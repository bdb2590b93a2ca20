/*
[INPUT]:  Error sources (validation, HTTP status, malformed bodies, transport, WebSocket)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Stockfighter adapter
#[derive(Error, Debug)]
pub enum StockfighterError {
    /// A required parameter is missing or invalid; raised before any I/O
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// An `ok: false` outcome folded into an error by the caller
    #[error("API error: {message}")]
    Api { message: String },

    /// Error-class HTTP status without a structured `ok` body
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// Body was not valid JSON
    #[error("Malformed response (HTTP {status}): {body}")]
    MalformedResponse { status: StatusCode, body: String },

    /// Connection-level failure (DNS, refused, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StockfighterError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StockfighterError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Check if the error is worth retrying. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            StockfighterError::Transport(_) | StockfighterError::WebSocket(_) => true,
            StockfighterError::Http { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            StockfighterError::Http { status, .. }
            | StockfighterError::MalformedResponse { status, .. } => Some(*status),
            StockfighterError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for StockfighterError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        StockfighterError::WebSocket(err.to_string())
    }
}

/// Result type alias for Stockfighter operations
pub type Result<T> = std::result::Result<T, StockfighterError>;
