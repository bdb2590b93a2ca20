/*
[INPUT]:  Venue and stock identifiers
[OUTPUT]: Liveness, listings, orderbooks and quotes
[POS]:    HTTP layer - market data endpoints
[UPDATE]: When adding new market data endpoints or changing response format
*/

use crate::http::endpoint::endpoints;
use crate::http::{Result, StockfighterClient};
use crate::types::{Heartbeat, Orderbook, Outcome, Quote, StockListing, VenueHeartbeat, VenueListing};

impl StockfighterClient {
    /// Global API liveness
    ///
    /// GET /heartbeat
    pub async fn heartbeat(&self) -> Result<Outcome<Heartbeat>> {
        self.call(&endpoints::HEARTBEAT, &[], &[], None).await
    }

    /// Venue liveness
    ///
    /// GET /venues/:venue/heartbeat
    pub async fn venue_heartbeat(&self, venue: &str) -> Result<Outcome<VenueHeartbeat>> {
        self.call(&endpoints::VENUE_HEARTBEAT, &[("venue", venue)], &[], None)
            .await
    }

    /// Tradable venues
    ///
    /// GET /venues
    pub async fn venues(&self) -> Result<Outcome<VenueListing>> {
        self.call(&endpoints::VENUES, &[], &[], None).await
    }

    /// Symbols traded on a venue
    ///
    /// GET /venues/:venue/stocks
    pub async fn venue_stocks(&self, venue: &str) -> Result<Outcome<StockListing>> {
        self.call(&endpoints::VENUE_STOCKS, &[("venue", venue)], &[], None)
            .await
    }

    /// Current bids and asks
    ///
    /// GET /venues/:venue/stocks/:stock
    pub async fn orderbook(&self, venue: &str, stock: &str) -> Result<Outcome<Orderbook>> {
        self.call(
            &endpoints::ORDERBOOK,
            &[("venue", venue), ("stock", stock)],
            &[],
            None,
        )
        .await
    }

    /// Latest quote snapshot
    ///
    /// GET /venues/:venue/stocks/:stock/quote
    pub async fn quote(&self, venue: &str, stock: &str) -> Result<Outcome<Quote>> {
        self.call(&endpoints::QUOTE, &[("venue", venue), ("stock", stock)], &[], None)
            .await
    }
}
