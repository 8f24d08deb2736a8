//! API client layer
//!
//! Single point of egress to the shortening backend.
//!
//! # Architecture
//!
//! ```text
//! flows → ApiClient (base URL + credential) → Transport (ureq, blocking pool)
//! ```
//!
//! # Error contract
//!
//! - no response received → `ClientError::Network`
//! - non-2xx status → `ClientError::Api { status, body }`
//!
//! No retries happen here; callers decide how to react.

mod client;
pub mod constants;
mod transport;

pub use client::ApiClient;
pub use transport::{ApiRequest, Method, RawResponse, Transport, UreqTransport};
