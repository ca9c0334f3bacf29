//! UptimeRobot API - HTTP client for the UptimeRobot v2 REST API.
//!
//! This crate exposes one generic call primitive, [`ApiClient::call`], which
//! posts form-encoded parameters to an endpoint and returns the decoded JSON
//! envelope. Rate limiting (HTTP 429) is handled transparently by waiting as
//! long as the service's `Retry-After` header advises and retrying.

pub mod client;
pub mod observer;
pub mod rate_limit;
pub mod response;

// Re-export key types
pub use client::{encode_params, ApiClient, RetryPolicy};
pub use observer::{CallObserver, NoopObserver, TracingObserver};
pub use rate_limit::RetryAfter;
pub use response::ResponseMap;
