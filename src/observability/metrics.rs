//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by operation, status
//! - `gateway_request_duration_seconds` (histogram): latency by operation
//! - `gateway_upstream_failures_total` (counter): failures by operation, stage
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished inbound request.
pub fn record_request(operation: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "gateway_request_duration_seconds",
        "operation" => operation.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a request that failed at or after the upstream call.
pub fn record_upstream_failure(operation: &str, stage: &str) {
    metrics::counter!(
        "gateway_upstream_failures_total",
        "operation" => operation.to_string(),
        "stage" => stage.to_string()
    )
    .increment(1);
}
