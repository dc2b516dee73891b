//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream base URL and credential header name
//! - Validate bind addresses and size limits
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("invalid upstream.base_url '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("upstream.api_key_header '{0}' is not a valid header name")]
    InvalidHeaderName(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,
}

/// Check a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.host_str().is_none() => errors.push(ValidationError::InvalidBaseUrl {
            value: config.upstream.base_url.clone(),
            reason: "missing host".to_string(),
        }),
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::InvalidBaseUrl {
                value: config.upstream.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            })
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            value: config.upstream.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.upstream.api_key_header.is_empty() {
        errors.push(ValidationError::Empty("upstream.api_key_header"));
    } else if HeaderName::from_bytes(config.upstream.api_key_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(
            config.upstream.api_key_header.clone(),
        ));
    }

    if config.upstream.credit_field.is_empty() {
        errors.push(ValidationError::Empty("upstream.credit_field"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
