//! Randomchat TUI entry point.

use std::{fs::File, sync::Mutex};

use clap::Parser;
use randomchat_client::{DEFAULT_HOST, Endpoint};
use randomchat_tui::{Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Randomchat terminal client
#[derive(Parser, Debug)]
#[command(name = "randomchat-tui")]
#[command(about = "Chat with a random stranger from the terminal")]
#[command(version)]
struct Args {
    /// Server host and port
    #[arg(long, env = "RANDOMCHAT_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// File to write logs to (the terminal belongs to the UI)
    #[arg(long, default_value = "randomchat.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let log_file = File::create(&args.log_file)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    let endpoint = Endpoint::new(args.host);
    tracing::info!(%endpoint, "randomchat starting");

    let driver = TerminalDriver::new()?;
    let runtime = Runtime::new(driver, endpoint);

    Ok(runtime.run().await?)
}
