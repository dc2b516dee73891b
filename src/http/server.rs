//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit)
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Query, State},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::gateway::{Dispatcher, Operation};
use crate::http::handlers::{self, TermSearchBody};
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::http::response;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let dispatcher = Dispatcher::from_config(&config.upstream)?;

        tracing::info!(
            upstream = %dispatcher.upstream().base_url(),
            credit_field = %dispatcher.credit_field(),
            "Upstream client ready"
        );

        let state = AppState {
            dispatcher: Arc::new(dispatcher),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/search", post(handlers::search))
            .route("/oathnet_ghunt", post(handlers::oathnet_ghunt))
            .route("/ping", get(handlers::ping))
            .route("/health", get(handlers::health));

        for operation in Operation::ALL {
            let path = format!("/{}", operation);
            if operation.query_param().is_some() {
                router = router.route(
                    &path,
                    get(
                        move |State(state): State<AppState>,
                              Query(params): Query<HashMap<String, String>>| {
                            handlers::lookup(state, operation, params)
                        },
                    ),
                );
            } else if operation.is_term_search() {
                router = router.route(
                    &path,
                    post(
                        move |State(state): State<AppState>,
                              body: Result<Json<TermSearchBody>, JsonRejection>| {
                            handlers::term_search(state, operation, body)
                        },
                    ),
                );
            }
        }

        router
            .fallback(|| async { response::not_found() })
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(set_request_id_layer())
    }

    /// Router with all routes and layers, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
