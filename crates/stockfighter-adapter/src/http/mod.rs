/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod endpoint;
pub mod error;
pub mod levels;
pub mod market;
pub mod normalize;
pub mod orders;

pub use error::{Result, StockfighterError};

pub use client::StockfighterClient;
pub use endpoint::{ApiRequest, Base, Endpoint, FailurePolicy};
