//! Search gateway library.
//!
//! Maps simplified client requests onto a single upstream search API and
//! returns a cleaned, reshaped copy of the upstream JSON.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::Dispatcher;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
