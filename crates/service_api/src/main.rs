//! Precio API Server
//!
//! REST API server for the pricing calculator.

use clap::Parser;
use service_api::config::{build_config, CliArgs as ConfigCliArgs};
use service_api::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Precio API Server - REST API for the pricing calculator
#[derive(Parser, Debug)]
#[command(name = "service_api")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "PRECIO_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRECIO_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PRECIO_LOG_LEVEL")]
    log_level: Option<String>,

    /// SQLite database file path
    #[arg(long, env = "PRECIO_DB_PATH")]
    db_path: Option<PathBuf>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            db_path: args.db_path,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    // Initialize tracing
    init_tracing(config.log_level.as_filter_str());

    tracing::info!("Precio API Server v{}", service_api::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        db_path = %config.db_path.display(),
        session_timeout_ms = %config.session_timeout_ms,
        "Server configuration loaded"
    );

    // Create and start the server
    let server = Server::new(config)?;
    tracing::info!(address = %server.socket_addr(), "Starting server");

    server.run().await?;

    Ok(())
}
