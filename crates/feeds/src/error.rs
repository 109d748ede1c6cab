//! Typed error enum for the feed clients.

use thiserror::Error;

/// Errors from external feed APIs.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// The places API rejected the request, typically a page token used too early.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The API's quota or rate limit was hit.
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("API error {status}: {message}")]
    Api { status: String, message: String },
    #[error("API rejected the key")]
    InvalidApiKey,
    #[error("no advisory for country {0}")]
    CountryNotFound(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl FeedError {
    /// Whether this error is transient and should be retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited(_) => true,
            Self::Status { code, .. } => matches!(code, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Whether the places paginator should back off and retry the same page.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::RateLimited(_))
    }
}
