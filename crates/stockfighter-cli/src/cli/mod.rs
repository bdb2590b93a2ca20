/*
[INPUT]:  Command-line arguments
[OUTPUT]: Parsed command tree for the stockfighter binary
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding subcommands or flags
*/

pub mod commands;
pub mod init;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stockfighter_adapter::{OrderType, StreamKind};

#[derive(Parser, Debug)]
#[command(name = "stockfighter", version, about = "Stockfighter trading API client")]
pub struct Cli {
    /// YAML configuration file; STOCKFIGHTER_* environment variables override it
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH", default_value = "stockfighter.yaml")]
        output: PathBuf,
    },
    /// Check that the API is up
    Heartbeat,
    /// Check that a venue is up
    VenueHeartbeat(VenueArgs),
    /// List venues
    Venues,
    /// List stocks traded on a venue
    Stocks(VenueArgs),
    /// Show the order book for a stock
    Orderbook(StockArgs),
    /// Show the latest quote for a stock
    Quote(StockArgs),
    /// Place a buy order
    Buy(OrderArgs),
    /// Place a sell order
    Sell(OrderArgs),
    /// Show an order
    Status(OrderIdArgs),
    /// Cancel an order
    Cancel(OrderIdArgs),
    /// List an account's orders on a venue
    Orders {
        #[command(flatten)]
        venue: VenueArgs,
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        stock: Option<String>,
    },
    /// Print stream events until interrupted
    Tail {
        #[arg(long, default_value = "tickertape")]
        kind: StreamKind,
        #[arg(long)]
        venue: Option<String>,
        #[arg(long)]
        stock: Option<String>,
    },
    /// Manage level instances
    #[command(subcommand)]
    Level(LevelCommand),
}

#[derive(Subcommand, Debug)]
pub enum LevelCommand {
    /// Start a level by name
    Start { name: String },
    Status { id: u64 },
    Restart { id: u64 },
    Resume { id: u64 },
    Stop { id: u64 },
}

#[derive(Args, Debug, Clone)]
pub struct VenueArgs {
    #[arg(long)]
    pub venue: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StockArgs {
    #[arg(long)]
    pub venue: Option<String>,
    #[arg(long)]
    pub stock: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    #[command(flatten)]
    pub target: StockArgs,
    #[arg(long)]
    pub qty: u64,
    /// Price in cents; ignored for market orders
    #[arg(long)]
    pub price: Option<u64>,
    #[arg(long = "type", default_value = "limit")]
    pub order_type: OrderType,
    #[arg(long)]
    pub account: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct OrderIdArgs {
    pub id: String,
    #[command(flatten)]
    pub target: StockArgs,
}
