//! Randomchat server binary.
//!
//! # Usage
//!
//! ```bash
//! # Listen on the default port
//! randomchat-server --bind 0.0.0.0:8080
//!
//! # Cap concurrent sessions
//! randomchat-server --bind 127.0.0.1:9000 --max-connections 100
//! ```

use clap::Parser;
use randomchat_server::{Server, ServerConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Randomchat matchmaking server
#[derive(Parser, Debug)]
#[command(name = "randomchat-server")]
#[command(about = "Random-pairing chat matchmaking server")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Maximum concurrent connections
    #[arg(long, default_value = "10000")]
    max_connections: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("Randomchat server starting");
    tracing::info!("Binding to {}", args.bind);

    let config = ServerConfig { bind_address: args.bind, max_connections: args.max_connections };

    let server = Server::bind(config).await?;

    tracing::info!("Server listening on {}", server.local_addr()?);

    server.run().await?;

    Ok(())
}
