//! Upstream payload construction.
//!
//! Turns a [`LogicalRequest`] into the exact path, verb and body/query the
//! upstream API expects. Validation of inbound inputs happens here, before
//! any network I/O.

use serde_json::{json, Map, Value};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::operation::{HttpMethod, LogicalRequest, Operation};

/// Upstream paths whose body is `{"term": ..., "search_type": ...}`.
const TERM_ENDPOINTS: [&str; 4] = [
    "/api/snusbase",
    "/api/breachbase",
    "/api/hackcheck",
    "/api/intelvault",
];

/// What is sent upstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Query(Vec<(String, String)>),
    Json(Value),
}

/// A fully resolved upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamCall {
    pub path: String,
    pub method: HttpMethod,
    pub payload: Payload,
}

impl UpstreamCall {
    fn get(path: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            payload: Payload::Query(params),
        }
    }

    fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            payload: Payload::Json(body),
        }
    }
}

/// Resolve the upstream call for a request.
pub fn build(request: &LogicalRequest) -> GatewayResult<UpstreamCall> {
    let operation = request.operation;

    let Some(endpoint) = operation.endpoint() else {
        return build_search(request);
    };

    if let Some(param) = operation.query_param() {
        let value = require(&request.query, || GatewayError::missing_parameter(param))?;
        return Ok(UpstreamCall::get(
            endpoint.path,
            vec![(param.to_string(), value.to_string())],
        ));
    }

    let body = match operation {
        op if op.is_term_search() => {
            let query = require(&request.query, || GatewayError::missing_field("query"))?;
            let search_type =
                require(&request.search_type, || GatewayError::missing_field("search_type"))?;
            term_body(query, search_type)
        }
        Operation::OathnetGhunt => {
            let email = require(&request.query, || GatewayError::missing_field("email"))?;
            json!({ "email": email })
        }
        other => {
            return Err(GatewayError::Configuration(format!(
                "no payload rule for operation '{}'",
                other
            )))
        }
    };

    Ok(UpstreamCall::post(endpoint.path, body))
}

/// Generic search: the caller names the endpoint and the verb.
fn build_search(request: &LogicalRequest) -> GatewayResult<UpstreamCall> {
    let endpoint = require(&request.endpoint, || GatewayError::missing_field("endpoint"))?;
    validate_endpoint(endpoint)?;

    if request.is_direct_get {
        let params = request
            .raw_params
            .as_ref()
            .map(query_pairs)
            .unwrap_or_default();
        return Ok(UpstreamCall::get(endpoint, params));
    }

    let body = match &request.raw_body {
        Some(body) => body.clone(),
        None => synthesize_body(
            endpoint,
            request.search_type.as_deref(),
            request.query.as_deref(),
        ),
    };

    Ok(UpstreamCall::post(endpoint, body))
}

/// Synthesize a POST body for a known endpoint family.
///
/// Missing inputs are forwarded as `null` and a missing search type keys the
/// `/api/search` entry as `"null"`. Unknown endpoints get an empty object.
pub fn synthesize_body(endpoint: &str, search_type: Option<&str>, query: Option<&str>) -> Value {
    let query_value = || query.map_or(Value::Null, |q| Value::String(q.to_string()));
    let type_value = || search_type.map_or(Value::Null, |t| Value::String(t.to_string()));

    match endpoint {
        "/api/search" => {
            let mut entry = Map::new();
            entry.insert(search_type.unwrap_or("null").to_string(), query_value());
            json!({ "field": [Value::Object(entry)] })
        }
        ep if TERM_ENDPOINTS.contains(&ep) => {
            json!({ "term": query_value(), "search_type": type_value() })
        }
        "/api/oathnet/search" => {
            json!({ "query": query_value(), "type": "text", "includeSnus": true })
        }
        "/api/oathnet/ghunt" => json!({ "email": query_value() }),
        _ => Value::Object(Map::new()),
    }
}

fn term_body(query: &str, search_type: &str) -> Value {
    json!({ "term": query, "search_type": search_type })
}

/// Endpoints must be plain absolute paths so they can only address the
/// configured upstream host.
fn validate_endpoint(endpoint: &str) -> GatewayResult<()> {
    let invalid = |reason: &str| GatewayError::InvalidField {
        field: "endpoint".to_string(),
        reason: reason.to_string(),
    };

    if !endpoint.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if endpoint.starts_with("//") {
        return Err(invalid("must be a path, not an authority"));
    }
    if endpoint.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("must not contain whitespace"));
    }
    Ok(())
}

/// Render caller params as query pairs. Strings go through verbatim.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

fn require<'a>(
    value: &'a Option<String>,
    missing: impl FnOnce() -> GatewayError,
) -> GatewayResult<&'a str> {
    require_str(value.as_deref(), missing)
}

fn require_str(value: Option<&str>, missing: impl FnOnce() -> GatewayError) -> GatewayResult<&str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing()),
    }
}
