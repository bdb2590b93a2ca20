/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Stockfighter adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod state;
pub mod types;
pub mod ws;

// Re-export commonly used types from http
pub use http::{ApiRequest, Base, Endpoint, FailurePolicy, Result, StockfighterClient, StockfighterError};

// Re-export client state
pub use state::{
    AccountHolder,
    ClientConfig,
    DEFAULT_AUTH_HEADER,
    DEFAULT_GM_URL,
    DEFAULT_REST_URL,
    DEFAULT_STREAM_URL,
};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    ExecutionReport,
    StreamError,
    StreamEvent,
    StreamMessage,
    Subscription,
    SubscriptionHandle,
    SubscriptionParams,
    SubscriptionState,
    TickertapeMessage,
};
