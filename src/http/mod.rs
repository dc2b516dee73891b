//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (extract inputs → LogicalRequest)
//!     → gateway dispatcher
//!     → JSON response or {"error": ...}
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
