//! Upstream API access.
//!
//! A single fixed host, a single static credential. Calls are plain async
//! I/O on the shared runtime with transport-default timeouts and no retries.

pub mod client;

pub use client::UpstreamClient;
