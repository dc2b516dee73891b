//! Response shapes for the gateway's own endpoints.
//!
//! Upstream-backed routes answer with the normalized upstream JSON or a
//! [`GatewayError`](crate::error::GatewayError) body; the types here cover the
//! local endpoints.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::ErrorBody;

/// Text returned by `/ping`.
pub const PING_TEXT: &str = "API is online.";

/// Body of `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Answer for unknown routes.
pub fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
        }),
    )
}
