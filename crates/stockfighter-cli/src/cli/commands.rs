/*
[INPUT]:  Parsed command, loaded configuration, shutdown token
[OUTPUT]: API results printed as JSON, stream events printed line by line
[POS]:    CLI layer - command execution over the adapter
[UPDATE]: When adding subcommands or changing output format
*/

use anyhow::{Context, Result, bail};
use serde::Serialize;
use stockfighter_adapter::{
    OrderId, OrderRequest, Outcome, StockfighterClient, StreamEvent, StreamMessage,
    SubscriptionParams,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::{Command, LevelCommand, OrderArgs, OrderIdArgs, StockArgs};
use crate::config::CliConfig;

/// Execute one API command. `Init` is handled before a client exists.
pub async fn run(
    command: Command,
    config: &CliConfig,
    client: &StockfighterClient,
    shutdown: CancellationToken,
) -> Result<()> {
    match command {
        Command::Init { .. } => bail!("init does not need a client"),
        Command::Heartbeat => print(client.heartbeat().await?),
        Command::VenueHeartbeat(args) => {
            let venue = config.venue_or(args.venue)?;
            print(client.venue_heartbeat(&venue).await?)
        }
        Command::Venues => print(client.venues().await?),
        Command::Stocks(args) => {
            let venue = config.venue_or(args.venue)?;
            print(client.venue_stocks(&venue).await?)
        }
        Command::Orderbook(args) => {
            let (venue, stock) = target(config, args)?;
            print(client.orderbook(&venue, &stock).await?)
        }
        Command::Quote(args) => {
            let (venue, stock) = target(config, args)?;
            print(client.quote(&venue, &stock).await?)
        }
        Command::Buy(args) => {
            let order = order_request(config, args)?;
            print(client.buy(&order).await?)
        }
        Command::Sell(args) => {
            let order = order_request(config, args)?;
            print(client.sell(&order).await?)
        }
        Command::Status(args) => {
            let (venue, stock, id) = order_target(config, args)?;
            print(client.order_status(&venue, &stock, &id).await?)
        }
        Command::Cancel(args) => {
            let (venue, stock, id) = order_target(config, args)?;
            print(client.cancel_order(&venue, &stock, &id).await?)
        }
        Command::Orders {
            venue,
            account,
            stock,
        } => {
            let venue = config.venue_or(venue.venue)?;
            let outcome = client
                .all_orders(&venue, account.as_deref(), stock.as_deref())
                .await?;
            print(outcome)
        }
        Command::Tail { kind, venue, stock } => {
            let params = SubscriptionParams {
                kind,
                venue: venue.or_else(|| config.venue.clone()),
                stock,
            };
            tail(client, params, shutdown).await
        }
        Command::Level(level) => run_level(level, client).await,
    }
}

async fn run_level(command: LevelCommand, client: &StockfighterClient) -> Result<()> {
    match command {
        LevelCommand::Start { name } => {
            let instance = client.start_level(&name).await?.into_result()?;
            info!(
                instance_id = instance.instance_id,
                account = %instance.account,
                "level started"
            );
            print_json(&instance)
        }
        LevelCommand::Status { id } => print(client.level_status(id).await?),
        LevelCommand::Restart { id } => print(client.restart_level(id).await?),
        LevelCommand::Resume { id } => print(client.resume_level(id).await?),
        LevelCommand::Stop { id } => print(client.stop_level(id).await?),
    }
}

/// Stream events to stdout until the stream closes or shutdown is requested.
async fn tail(
    client: &StockfighterClient,
    params: SubscriptionParams,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut subscription = client.subscribe(params).context("open subscription")?;
    info!(url = %subscription.url(), "tailing stream");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            event = subscription.next() => match event {
                Some(StreamEvent::Open) => info!("stream open"),
                Some(StreamEvent::Message(StreamMessage::Quote(tick))) => print_json(&tick.quote)?,
                Some(StreamEvent::Message(StreamMessage::Execution(report))) => print_json(&report)?,
                Some(StreamEvent::Error(err)) => warn!(error = %err, "stream error"),
                Some(StreamEvent::Closed) | None => break,
            },
        }
    }

    subscription.close().await;
    info!("stream closed");
    Ok(())
}

fn target(config: &CliConfig, args: StockArgs) -> Result<(String, String)> {
    Ok((config.venue_or(args.venue)?, config.stock_or(args.stock)?))
}

fn order_target(config: &CliConfig, args: OrderIdArgs) -> Result<(String, String, OrderId)> {
    let (venue, stock) = target(config, args.target)?;
    Ok((venue, stock, OrderId::from(args.id)))
}

fn order_request(config: &CliConfig, args: OrderArgs) -> Result<OrderRequest> {
    let (venue, stock) = target(config, args.target)?;
    Ok(OrderRequest {
        account: args.account,
        venue,
        stock,
        price: args.price,
        quantity: args.qty,
        order_type: args.order_type,
    })
}

fn print<T: Serialize>(outcome: Outcome<T>) -> Result<()> {
    let value = outcome.into_result()?;
    print_json(&value)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render JSON")?;
    println!("{rendered}");
    Ok(())
}
