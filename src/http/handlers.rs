//! Inbound route handlers.
//!
//! Each handler reduces its HTTP input to a [`LogicalRequest`] and hands it
//! to the dispatcher. Request counting happens here so that body rejections
//! are counted too.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::gateway::{LogicalRequest, Operation};
use crate::http::response::{HealthResponse, PING_TEXT};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Body of `POST /search`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchBody {
    pub search_type: Option<String>,
    pub query: Option<String>,
    pub endpoint: Option<String>,
    pub is_get: Option<bool>,
    pub params: Option<Map<String, Value>>,
    pub post_body: Option<Value>,
}

impl From<SearchBody> for LogicalRequest {
    fn from(body: SearchBody) -> Self {
        LogicalRequest {
            operation: Operation::Search,
            search_type: body.search_type,
            query: body.query,
            endpoint: body.endpoint,
            is_direct_get: body.is_get.unwrap_or(false),
            raw_params: body.params,
            raw_body: body.post_body,
        }
    }
}

/// Body of the breach-search routes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TermSearchBody {
    pub search_type: Option<String>,
    pub query: Option<String>,
}

/// Body of `POST /oathnet_ghunt`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GhuntBody {
    pub email: Option<String>,
}

pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    match body {
        Ok(Json(body)) => dispatch(&state, body.into(), start).await,
        Err(rejection) => reject(Operation::Search, rejection, start),
    }
}

/// Breach searches: snusbase, intelvault, breachbase, hackcheck.
pub async fn term_search(
    state: AppState,
    operation: Operation,
    body: Result<Json<TermSearchBody>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    match body {
        Ok(Json(body)) => {
            let request = LogicalRequest::term_search(operation, body.query, body.search_type);
            dispatch(&state, request, start).await
        }
        Err(rejection) => reject(operation, rejection, start),
    }
}

/// GET-style lookups binding one named query parameter.
pub async fn lookup(
    state: AppState,
    operation: Operation,
    mut params: HashMap<String, String>,
) -> Response {
    let start = Instant::now();
    let value = operation.query_param().and_then(|name| params.remove(name));
    dispatch(&state, LogicalRequest::lookup(operation, value), start).await
}

pub async fn oathnet_ghunt(
    State(state): State<AppState>,
    body: Result<Json<GhuntBody>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    match body {
        Ok(Json(body)) => {
            let request = LogicalRequest::lookup(Operation::OathnetGhunt, body.email);
            dispatch(&state, request, start).await
        }
        Err(rejection) => reject(Operation::OathnetGhunt, rejection, start),
    }
}

pub async fn ping() -> &'static str {
    PING_TEXT
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Route a request through the dispatcher and render the outcome.
pub async fn dispatch(state: &AppState, request: LogicalRequest, start: Instant) -> Response {
    let operation = request.operation;
    let response = match state.dispatcher.dispatch(request).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => e.into_response(),
    };
    metrics::record_request(operation.as_str(), response.status().as_u16(), start);
    response
}

fn reject(operation: Operation, rejection: JsonRejection, start: Instant) -> Response {
    let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(rejection.body_text())
    } else {
        GatewayError::InvalidBody(rejection.body_text())
    };
    tracing::info!(operation = %operation, error = %err, "Rejected request body");
    let response = err.into_response();
    metrics::record_request(operation.as_str(), response.status().as_u16(), start);
    response
}
