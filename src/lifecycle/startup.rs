//! Startup orchestration.
//!
//! # Order
//! 1. Configuration is already loaded and validated by the caller
//! 2. Metrics exporter (optional)
//! 3. Upstream client and HTTP router
//! 4. Listener bind, then serve until a shutdown signal
//!
//! Any startup error is fatal.

use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Boxed error returned by [`run`].
pub type StartupError = Box<dyn std::error::Error + Send + Sync>;

/// Start every subsystem and serve until SIGINT/SIGTERM.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    if config.upstream.api_key.is_empty() {
        tracing::warn!("No upstream API key configured; upstream calls will be unauthenticated");
    }

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let server = HttpServer::new(config.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
