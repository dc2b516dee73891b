//! Search gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                  SEARCH GATEWAY                  │
//!                         │                                                  │
//!   Client Request        │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ──────────────────────┼─▶│  http   │──▶│ handlers │──▶│  dispatcher  │   │
//!                         │  │ server  │   │          │   │ + payload    │   │
//!                         │  └─────────┘   └──────────┘   └──────┬───────┘   │
//!                         │                                      │           │
//!                         │                                      ▼           │
//!   Client Response       │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ◀─────────────────────┼──│ flatten  │◀──│ sanitize │◀──│   upstream   │◀─┼── Upstream
//!                         │  │(enrich.) │   │ (credit) │   │    client    │  │    API
//!                         │  └──────────┘   └──────────┘   └──────────────┘  │
//!                         │                                                  │
//!                         │   config · observability · lifecycle             │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use search_gateway::config::{default_config, load_config};
use search_gateway::lifecycle::startup;
use search_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "search-gateway")]
#[command(about = "Gateway in front of the upstream search API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };

    logging::init_logging(&config.observability);

    tracing::info!("search-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
