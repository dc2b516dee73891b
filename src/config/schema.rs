//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream search API settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Inbound request hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream API configuration.
///
/// The host is fixed for the lifetime of the process; inbound requests can
/// only choose a path on it.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheme and host of the upstream API.
    pub base_url: String,

    /// Static credential attached to every upstream call.
    pub api_key: String,

    /// Header carrying the credential.
    pub api_key_header: String,

    /// Metadata key stripped from every upstream response.
    pub credit_field: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://osintdog.com".to_string(),
            api_key: String::new(),
            api_key_header: "X-API-Key".to_string(),
            credit_field: "credit".to_string(),
        }
    }
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("api_key_header", &self.api_key_header)
            .field("credit_field", &self.credit_field)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}
