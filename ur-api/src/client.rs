//! HTTP client for the UptimeRobot v2 REST API.
//!
//! Every endpoint is a form-encoded POST returning a JSON envelope. The client
//! injects the API key and output format, keeps resending while the service
//! answers 429, and validates the envelope of the first admitted response.

use std::sync::Arc;

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, debug_span, Instrument};

use ur_core::config::ApiConfig;
use ur_core::constants;
use ur_core::error::{UrError, UrResult};

use crate::observer::{CallObserver, TracingObserver};
use crate::rate_limit::wait_for_retry_after;
use crate::response::{decode_envelope, ResponseMap};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Retry behaviour on HTTP 429.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    /// Maximum number of retries after a 429. `None` retries until the service admits the request.
    pub max_rate_limit_retries: Option<u32>,
}

/// Client for the UptimeRobot API.
///
/// Cheap to clone; clones share the connection pool and nothing else. Calls
/// never mutate the client, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// API root, e.g. "https://api.uptimerobot.com/v2".
    base_url: String,
    /// Account or monitor API key injected into every payload.
    api_key: String,
    retry_policy: RetryPolicy,
    observer: Arc<dyn CallObserver>,
}

impl ApiClient {
    /// Create a new client for `api_key` using the connection settings in `config`.
    pub fn new(api_key: impl Into<String>, config: &ApiConfig) -> UrResult<Self> {
        let base_url = ApiConfig::sanitize_base_url(&config.base_url);
        Url::parse(&base_url)
            .map_err(|e| UrError::RequestConstruction(format!("invalid base URL {base_url:?}: {e}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| UrError::RequestConstruction(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            base_url,
            api_key: api_key.into(),
            retry_policy: RetryPolicy {
                max_rate_limit_retries: config.max_rate_limit_retries,
            },
            observer: Arc::new(TracingObserver),
        })
    }

    /// Set custom retry policy.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Route diagnostics to `observer` instead of `tracing`.
    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the API root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Build the full URL for an endpoint name such as `getMonitors`.
    pub fn endpoint_url(&self, endpoint: &str) -> UrResult<Url> {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            return Err(UrError::RequestConstruction("endpoint must not be empty".into()));
        }
        let raw = format!("{}/{endpoint}", self.base_url);
        Url::parse(&raw).map_err(|e| UrError::RequestConstruction(format!("invalid URL {raw:?}: {e}")))
    }

    /// Build the form payload for already-encoded `params`.
    pub fn payload(&self, params: &str) -> String {
        let mut payload = format!("api_key={}&format={}", self.api_key, constants::OUTPUT_FORMAT);
        if !params.is_empty() {
            payload.push('&');
            payload.push_str(params);
        }
        payload
    }

    /// Call `endpoint` with form-encoded `params` and return the validated envelope.
    ///
    /// `params` must already be percent-encoded and must not carry `api_key`
    /// or `format`. HTTP 429 responses are waited out and retried with the
    /// same payload; any other failure is returned immediately.
    pub async fn call(&self, endpoint: &str, params: &str) -> UrResult<ResponseMap> {
        let span = debug_span!("api_call", endpoint);
        async move {
            let mut attempts = 0;
            let result = self.execute(endpoint, params, &mut attempts).await;
            self.observer.call_finished(endpoint, attempts, result.is_ok());
            result
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, endpoint: &str, params: &str, attempts: &mut u32) -> UrResult<ResponseMap> {
        let url = self.endpoint_url(endpoint)?;
        let payload = self.payload(params);

        let response = loop {
            *attempts += 1;
            self.observer.request_started(endpoint, *attempts);

            let response = self
                .build_request(url.clone(), payload.clone())
                .send()
                .await
                .map_err(Self::classify_error)?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                break response;
            }

            if let Some(max) = self.retry_policy.max_rate_limit_retries {
                if *attempts > max {
                    return Err(UrError::RateLimitExhausted {
                        endpoint: endpoint.to_string(),
                        attempts: *attempts,
                    });
                }
            }

            wait_for_retry_after(response.headers(), endpoint, *attempts, self.observer.as_ref()).await;
        };

        debug!(status = response.status().as_u16(), "response received");

        let body = response
            .text()
            .await
            .map_err(|e| UrError::BodyRead(e.to_string()))?;

        decode_envelope(&body)
    }

    /// Internal: build one POST attempt.
    fn build_request(&self, url: Url, payload: String) -> RequestBuilder {
        self.inner
            .post(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(payload)
    }

    /// Classify a reqwest error into a UrError variant.
    fn classify_error(e: reqwest::Error) -> UrError {
        if e.is_builder() {
            UrError::RequestConstruction(e.to_string())
        } else if e.is_timeout() {
            UrError::Timeout(e.to_string())
        } else if e.is_connect() {
            UrError::Transport(format!("connection failed: {e}"))
        } else {
            UrError::Transport(e.to_string())
        }
    }
}

/// Percent-encode key/value pairs into a `params` string for [`ApiClient::call`].
pub fn encode_params<K, V>(pairs: &[(K, V)]) -> UrResult<String>
where
    K: Serialize,
    V: Serialize,
{
    serde_urlencoded::to_string(pairs)
        .map_err(|e| UrError::RequestConstruction(format!("encoding params: {e}")))
}
