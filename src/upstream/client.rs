//! Upstream API client.
//!
//! # Responsibilities
//! - Attach the static credential header to every call
//! - Pin every request to the configured host
//! - Decode JSON responses, folding every failure into `GatewayError::Upstream`

use axum::http::{HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::operation::HttpMethod;
use crate::gateway::payload::{Payload, UpstreamCall};

/// Longest slice of an error body quoted back to the client.
const MAX_ERROR_BODY: usize = 200;

/// Authenticated client for the upstream search API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    api_key_header: HeaderName,
    api_key: HeaderValue,
}

impl UpstreamClient {
    /// Create a client from validated configuration.
    pub fn new(config: &UpstreamConfig) -> GatewayResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Configuration(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        let api_key_header = HeaderName::from_bytes(config.api_key_header.as_bytes())
            .map_err(|e| GatewayError::Configuration(format!("invalid API key header: {}", e)))?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| GatewayError::Configuration(format!("invalid API key: {}", e)))?;
        api_key.set_sensitive(true);

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            api_key_header,
            api_key,
        })
    }

    /// Perform a resolved call.
    pub async fn execute(&self, call: &UpstreamCall) -> GatewayResult<Value> {
        match (&call.method, &call.payload) {
            (HttpMethod::Get, Payload::Query(params)) => self.get(&call.path, params).await,
            (HttpMethod::Post, Payload::Json(body)) => self.post(&call.path, body).await,
            (method, _) => Err(GatewayError::Configuration(format!(
                "payload does not match {} call to {}",
                method, call.path
            ))),
        }
    }

    /// GET `path` with query parameters.
    pub async fn get(&self, path: &str, params: &[(String, String)]) -> GatewayResult<Value> {
        let url = self.endpoint_url(path)?;
        tracing::debug!(url = %url, params = params.len(), "Upstream GET");

        let response = self
            .http
            .get(url)
            .header(self.api_key_header.clone(), self.api_key.clone())
            .query(params)
            .send()
            .await?;

        read_json(response).await
    }

    /// POST a JSON body to `path`.
    pub async fn post(&self, path: &str, body: &Value) -> GatewayResult<Value> {
        let url = self.endpoint_url(path)?;
        tracing::debug!(url = %url, "Upstream POST");

        let response = self
            .http
            .post(url)
            .header(self.api_key_header.clone(), self.api_key.clone())
            .json(body)
            .send()
            .await?;

        read_json(response).await
    }

    /// Base URL the client is pinned to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` (optionally with a `?query`) against the base URL.
    /// Only path and query are replaced, so the host cannot change.
    fn endpoint_url(&self, path: &str) -> GatewayResult<Url> {
        if !path.starts_with('/') {
            return Err(GatewayError::InvalidField {
                field: "endpoint".to_string(),
                reason: "must start with '/'".to_string(),
            });
        }

        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(query);
        Ok(url)
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key_header", &self.api_key_header)
            .finish()
    }
}

async fn read_json(response: reqwest::Response) -> GatewayResult<Value> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let text = String::from_utf8_lossy(&bytes);
        let snippet: String = text.chars().take(MAX_ERROR_BODY).collect();
        return Err(GatewayError::Upstream(format!(
            "Upstream returned status {}: {}",
            status, snippet
        )));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| GatewayError::Upstream(format!("Upstream returned invalid JSON: {}", e)))
}
