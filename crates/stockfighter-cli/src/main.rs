/*
[INPUT]:  CLI arguments, YAML configuration file, environment, OS shutdown signals
[OUTPUT]: API results on stdout, logs on stderr, graceful stream shutdown
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use stockfighter_adapter::StockfighterClient;
use stockfighter_cli::cli::{commands, init};
use stockfighter_cli::{Cli, CliConfig, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let command = match args.command {
        Command::Init { output } => return init::run_init(output),
        command => command,
    };

    let config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    let client = StockfighterClient::with_config(config.client_config()?)
        .context("create client")?;
    debug!(
        config_path = ?args.config_path,
        account = ?client.account(),
        "client ready"
    );

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    commands::run(command, &config, &client, shutdown).await
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
