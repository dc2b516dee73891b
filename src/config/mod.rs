//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared by value with the subsystems that need it at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_config, load_config, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::SecurityConfig;
pub use schema::UpstreamConfig;
