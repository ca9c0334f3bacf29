//! Observability hooks for API calls.
//!
//! The client reports what it is doing to a [`CallObserver`] supplied by the
//! caller instead of writing to a process-wide logger directly. The default
//! [`TracingObserver`] forwards everything to `tracing`.

use std::time::Duration;

use tracing::{debug, warn};

use crate::rate_limit::RetryAfter;

/// Receives diagnostic events from [`crate::ApiClient`].
///
/// All methods default to doing nothing, so implementors only override
/// what they care about.
pub trait CallObserver: Send + Sync {
    /// A request to `endpoint` is about to be sent. `attempt` starts at 1.
    fn request_started(&self, _endpoint: &str, _attempt: u32) {}

    /// The service answered 429 and the client will wait `delay` before retrying.
    fn rate_limited(
        &self,
        _endpoint: &str,
        _attempt: u32,
        _retry_after: &RetryAfter,
        _delay: Duration,
    ) {
    }

    /// The call finished after `attempts` requests.
    fn call_finished(&self, _endpoint: &str, _attempts: u32, _ok: bool) {}
}

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CallObserver for NoopObserver {}

/// Observer that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn request_started(&self, endpoint: &str, attempt: u32) {
        debug!(endpoint, attempt, "making request to {endpoint:?}");
    }

    fn rate_limited(&self, endpoint: &str, attempt: u32, retry_after: &RetryAfter, delay: Duration) {
        match retry_after {
            RetryAfter::Seconds(_) => {}
            RetryAfter::Missing => {
                debug!("Retry-After header is missing, waiting {}s for next request attempt", delay.as_secs());
            }
            RetryAfter::MultipleValues(count) => {
                warn!(
                    count,
                    "Retry-After header has {count} values, waiting {}s for next request attempt",
                    delay.as_secs()
                );
            }
            RetryAfter::Unparseable(raw) => {
                warn!(
                    raw = raw.as_str(),
                    "parsing {raw:?} as Retry-After header value in seconds failed, waiting {}s for next request",
                    delay.as_secs()
                );
            }
        }
        debug!(
            endpoint,
            attempt,
            "rate limit exceeded, waiting {} seconds to send next request",
            delay.as_secs()
        );
    }

    fn call_finished(&self, endpoint: &str, attempts: u32, ok: bool) {
        debug!(endpoint, attempts, ok, "request to {endpoint:?} finished");
    }
}
