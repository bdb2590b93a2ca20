/*
[INPUT]:  Order requests, order ids, account identifiers
[OUTPUT]: Order state reported by the exchange
[POS]:    HTTP layer - order placement, status, cancellation and history
[UPDATE]: When adding new order endpoints or changing order flow
*/

use tracing::{debug, info};

use crate::http::endpoint::endpoints;
use crate::http::{Result, StockfighterClient};
use crate::types::{AccountOrders, Direction, OrderBody, OrderId, OrderRequest, OrderStatus, Outcome};

impl StockfighterClient {
    /// Place a buy order
    ///
    /// POST /venues/:venue/stocks/:stock/orders
    pub async fn buy(&self, order: &OrderRequest) -> Result<Outcome<OrderStatus>> {
        self.place_order(Direction::Buy, order).await
    }

    /// Place a sell order
    ///
    /// POST /venues/:venue/stocks/:stock/orders
    pub async fn sell(&self, order: &OrderRequest) -> Result<Outcome<OrderStatus>> {
        self.place_order(Direction::Sell, order).await
    }

    /// Place an order in the given direction.
    ///
    /// The request's account is used when present, otherwise the held one.
    pub async fn place_order(
        &self,
        direction: Direction,
        order: &OrderRequest,
    ) -> Result<Outcome<OrderStatus>> {
        order.validate()?;
        let account = self.account_holder().resolve(order.account.as_deref())?;
        let body = serde_json::to_value(OrderBody::new(order, &account, direction))?;

        let outcome: Outcome<OrderStatus> = self
            .call(
                &endpoints::PLACE_ORDER,
                &[("venue", order.venue.as_str()), ("stock", order.stock.as_str())],
                &[],
                Some(body),
            )
            .await?;

        if let Outcome::Success(status) = &outcome {
            info!(
                id = %status.id,
                venue = %status.venue,
                symbol = %status.symbol,
                direction = direction.as_str(),
                qty = status.original_qty,
                open = status.open,
                "order placed"
            );
        }
        Ok(outcome)
    }

    /// Current state of an order
    ///
    /// GET /venues/:venue/stocks/:stock/orders/:id
    pub async fn order_status(
        &self,
        venue: &str,
        stock: &str,
        id: &OrderId,
    ) -> Result<Outcome<OrderStatus>> {
        self.call(
            &endpoints::ORDER_STATUS,
            &[("venue", venue), ("stock", stock), ("id", id.as_str())],
            &[],
            None,
        )
        .await
    }

    /// Cancel an order.
    ///
    /// DELETE /venues/:venue/stocks/:stock/orders/:id
    ///
    /// Cancelling an order that is already closed succeeds: when the exchange
    /// rejects the cancel, the order status is fetched and returned if the
    /// order is no longer open.
    pub async fn cancel_order(
        &self,
        venue: &str,
        stock: &str,
        id: &OrderId,
    ) -> Result<Outcome<OrderStatus>> {
        let outcome: Outcome<OrderStatus> = self
            .call(
                &endpoints::CANCEL_ORDER,
                &[("venue", venue), ("stock", stock), ("id", id.as_str())],
                &[],
                None,
            )
            .await?;

        let Outcome::Rejected(rejection) = outcome else {
            return Ok(outcome);
        };

        debug!(id = %id, error = %rejection.error, "cancel rejected, checking order state");
        match self.order_status(venue, stock, id).await? {
            Outcome::Success(status) if !status.open => Ok(Outcome::Success(status)),
            _ => Ok(Outcome::Rejected(rejection)),
        }
    }

    /// Orders placed by an account on a venue, optionally narrowed to one stock.
    ///
    /// GET /venues/:venue/accounts/:account/orders
    /// GET /venues/:venue/accounts/:account/stocks/:stock/orders
    pub async fn all_orders(
        &self,
        venue: &str,
        account: Option<&str>,
        stock: Option<&str>,
    ) -> Result<Outcome<AccountOrders>> {
        let account = self.account_holder().resolve(account)?;
        match stock {
            Some(stock) => {
                self.call(
                    &endpoints::ACCOUNT_STOCK_ORDERS,
                    &[("venue", venue), ("account", account.as_str()), ("stock", stock)],
                    &[],
                    None,
                )
                .await
            }
            None => {
                self.call(
                    &endpoints::ACCOUNT_ORDERS,
                    &[("venue", venue), ("account", account.as_str())],
                    &[],
                    None,
                )
                .await
            }
        }
    }
}
