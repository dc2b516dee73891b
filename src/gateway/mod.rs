//! Request routing and response normalization.
//!
//! # Data Flow
//! ```text
//! LogicalRequest
//!     → payload.rs (validate inputs, resolve endpoint + body/query)
//!     → upstream client (authenticated GET/POST)
//!     → sanitize.rs (strip credit metadata, every depth)
//!     → flatten.rs (enrichment operations only)
//!     → JSON body for the client
//! ```
//!
//! # Design Decisions
//! - Endpoint table is static; only the generic search picks its own path
//! - Inputs are validated before any network I/O
//! - No retries: every failure is terminal for its request

pub mod dispatcher;
pub mod flatten;
pub mod operation;
pub mod payload;
pub mod sanitize;

pub use dispatcher::{Dispatcher, Stage};
pub use operation::{HttpMethod, LogicalRequest, Operation, UpstreamEndpoint};
pub use payload::{Payload, UpstreamCall};
