//! Error types for the UptimeRobot client.
//!
//! Every way a call can fail is represented by a variant of `UrError`.
//! Rate limiting (HTTP 429) is not an error: it is absorbed by the retry loop.

use thiserror::Error;

/// Convenience type alias for Results using UrError.
pub type UrResult<T> = Result<T, UrError>;

/// Unified error type for the client and its configuration layer.
#[derive(Error, Debug)]
pub enum UrError {
    // -- Call errors --
    /// The request could not be built (bad endpoint, bad base URL, client builder failure).
    #[error("constructing request: {0}")]
    RequestConstruction(String),

    /// The request could not be delivered (connection refused, TLS, protocol error).
    #[error("performing API request: {0}")]
    Transport(String),

    /// The request timed out at the network layer.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// The response body could not be read.
    #[error("reading response body: {0}")]
    BodyRead(String),

    /// The response body is not a JSON object.
    #[error("decoding response body {body:?}: {message}")]
    Decode {
        /// Raw response body as received.
        body: String,
        /// Decoder error message.
        message: String,
    },

    /// The envelope reported a non-"ok" status. Holds the compact JSON of its `error` field.
    #[error("got error from UptimeRobot: {0}")]
    Api(String),

    /// The service kept answering 429 past the configured retry bound.
    #[error("rate limit exhausted for {endpoint} after {attempts} attempts")]
    RateLimitExhausted {
        /// Endpoint that was being called.
        endpoint: String,
        /// Total number of requests issued.
        attempts: u32,
    },

    // -- Configuration errors --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UrError {
    /// Whether the caller could reasonably try the same call again.
    ///
    /// The client never retries these itself.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            UrError::Transport(_) | UrError::Timeout(_) | UrError::RateLimitExhausted { .. }
        )
    }

    /// Service-side error detail, if this is an application failure.
    pub fn api_detail(&self) -> Option<&str> {
        match self {
            UrError::Api(detail) => Some(detail),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for UrError {
    fn from(e: toml::de::Error) -> Self {
        UrError::Config(e.to_string())
    }
}
