//! Request dispatch.
//!
//! # Request States
//! ```text
//! Received → PayloadBuilt → UpstreamCalled → Sanitized → [Flattened] → Responded
//!     any step may exit early with Failed(reason)
//! ```
//!
//! The dispatcher holds only immutable configuration, so one instance is
//! shared by every in-flight request.

use std::fmt;
use std::time::Instant;

use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::GatewayResult;
use crate::gateway::operation::LogicalRequest;
use crate::gateway::{flatten, payload, sanitize};
use crate::observability::metrics;
use crate::upstream::UpstreamClient;

/// Where a request is in its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    PayloadBuilt,
    UpstreamCalled,
    Sanitized,
    Flattened,
    Responded,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::PayloadBuilt => "payload_built",
            Stage::UpstreamCalled => "upstream_called",
            Stage::Sanitized => "sanitized",
            Stage::Flattened => "flattened",
            Stage::Responded => "responded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public entry point for gateway operations.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    upstream: UpstreamClient,
    credit_field: String,
}

impl Dispatcher {
    pub fn new(upstream: UpstreamClient, credit_field: impl Into<String>) -> Self {
        Self {
            upstream,
            credit_field: credit_field.into(),
        }
    }

    /// Build a dispatcher and its upstream client from configuration.
    pub fn from_config(config: &UpstreamConfig) -> GatewayResult<Self> {
        let upstream = UpstreamClient::new(config)?;
        Ok(Self::new(upstream, config.credit_field.clone()))
    }

    /// Run one request through the pipeline.
    pub async fn dispatch(&self, request: LogicalRequest) -> GatewayResult<Value> {
        let operation = request.operation;
        let start = Instant::now();
        let mut stage = Stage::Received;

        let result = self.run(&request, &mut stage).await;

        match &result {
            Ok(_) => {
                tracing::debug!(
                    operation = %operation,
                    stage = %Stage::Responded,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Request completed"
                );
            }
            Err(e) if e.is_validation() => {
                tracing::info!(operation = %operation, stage = %stage, error = %e, "Request rejected");
            }
            Err(e) => {
                tracing::error!(operation = %operation, stage = %stage, error = %e, "Request failed");
                metrics::record_upstream_failure(operation.as_str(), stage.as_str());
            }
        }

        result
    }

    async fn run(&self, request: &LogicalRequest, stage: &mut Stage) -> GatewayResult<Value> {
        let operation = request.operation;

        let call = payload::build(request)?;
        *stage = Stage::PayloadBuilt;
        tracing::debug!(operation = %operation, method = %call.method, path = %call.path, "Payload built");

        let raw = self.upstream.execute(&call).await?;
        *stage = Stage::UpstreamCalled;

        let mut result = sanitize::strip(raw, &self.credit_field);
        *stage = Stage::Sanitized;

        if operation.flattens_response() {
            result = flatten::flatten(result);
            *stage = Stage::Flattened;
        }
        tracing::debug!(operation = %operation, stage = %stage, "Response normalized");

        Ok(result)
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }

    pub fn credit_field(&self) -> &str {
        &self.credit_field
    }
}
