//! Gateway error taxonomy.
//!
//! Validation failures map to 400 (413 for oversized bodies), everything that happens at or after the
//! upstream call maps to 500. The message text is passed to the client as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while serving a gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required query-string parameter was absent or empty.
    #[error("Missing {0} parameter")]
    MissingParameter(String),

    /// A required JSON body field was absent or empty.
    #[error("Missing {0} field")]
    MissingField(String),

    /// A field was present but unusable.
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// The inbound body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The inbound body exceeded `security.max_body_size`.
    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    /// Transport failure, non-2xx status or non-JSON body from upstream.
    #[error("{0}")]
    Upstream(String),

    /// The gateway itself is misconfigured (bad credential header, base URL).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField(name.into())
    }

    /// HTTP status reported to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter(_)
            | GatewayError::MissingField(_)
            | GatewayError::InvalidField { .. }
            | GatewayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Upstream(_) | GatewayError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// True for client input errors.
    pub fn is_validation(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
