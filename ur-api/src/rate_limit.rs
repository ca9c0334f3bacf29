//! Rate-limit waiter.
//!
//! When the service answers HTTP 429 it may advise how long to back off with a
//! `Retry-After` header holding a whole number of seconds. Anything other than
//! exactly one such value falls back to a one second wait.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

use ur_core::constants::DEFAULT_RETRY_AFTER_SECS;

use crate::observer::CallObserver;

/// Classification of the `Retry-After` header on a 429 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryAfter {
    /// A single value holding a non-negative number of seconds.
    Seconds(u64),
    /// No header was sent.
    Missing,
    /// The header was sent more than once.
    MultipleValues(usize),
    /// A single value that is not a whole number of seconds. Holds the raw text.
    Unparseable(String),
}

impl RetryAfter {
    /// Classify the `Retry-After` header. Every header map maps to exactly one variant.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut values = headers.get_all(RETRY_AFTER).iter();
        let Some(first) = values.next() else {
            return RetryAfter::Missing;
        };
        let extra = values.count();
        if extra > 0 {
            return RetryAfter::MultipleValues(extra + 1);
        }

        let raw = String::from_utf8_lossy(first.as_bytes());
        match raw.trim().parse::<u64>() {
            Ok(seconds) => RetryAfter::Seconds(seconds),
            Err(_) => RetryAfter::Unparseable(raw.into_owned()),
        }
    }

    /// How long to wait before the next attempt.
    pub fn delay(&self) -> Duration {
        match self {
            RetryAfter::Seconds(seconds) => Duration::from_secs(*seconds),
            RetryAfter::Missing | RetryAfter::MultipleValues(_) | RetryAfter::Unparseable(_) => {
                Duration::from_secs(DEFAULT_RETRY_AFTER_SECS)
            }
        }
    }
}

/// Wait out a 429 response as advised by its headers.
///
/// Reports the decision to `observer`, then sleeps. Never fails; returns the
/// duration it waited.
pub async fn wait_for_retry_after(
    headers: &HeaderMap,
    endpoint: &str,
    attempt: u32,
    observer: &dyn CallObserver,
) -> Duration {
    let retry_after = RetryAfter::from_headers(headers);
    let delay = retry_after.delay();
    observer.rate_limited(endpoint, attempt, &retry_after, delay);
    tokio::time::sleep(delay).await;
    delay
}
