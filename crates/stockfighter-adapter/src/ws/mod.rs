/*
[INPUT]:  Subscription parameters (kind, venue, stock) and the held account
[OUTPUT]: Real-time quote and execution streams
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod channel;
pub mod client;
pub mod message;

pub use channel::SubscriptionParams;
pub use client::{Subscription, SubscriptionHandle, SubscriptionState};
pub use message::{ExecutionReport, StreamError, StreamEvent, StreamMessage, TickertapeMessage};
