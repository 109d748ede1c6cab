//! Typed error enums for the storage layer.
//!
//! Callers match on specific failure modes (not found, transient transport
//! errors, store-reported operation failures) instead of inspecting strings.

use std::time::Duration;

use thiserror::Error;

/// Store-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found for an expected-present key.
    #[error("not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    /// Connection, TLS or client timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success HTTP status.
    #[error("HTTP status {code}: {body}")]
    Status { code: u16, body: String },

    /// The store accepted the request but reported an error for the operation.
    #[error("store operation failed: {0}")]
    Operation(String),

    /// Response payload could not be decoded into the expected shape.
    #[error("decode error in {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { code, .. } => matches!(code, 429 | 502 | 503 | 504),
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the underlying HTTP call hit its deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// The store never reported healthy before the deadline.
#[derive(Debug, Error)]
#[error("store not ready after {attempts} attempt(s) within {deadline:?}: {last_error}")]
pub struct ReadinessError {
    pub deadline: Duration,
    pub attempts: u32,
    pub last_error: String,
}

/// Schema management failures.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    NotReady(#[from] ReadinessError),

    #[error("schema operation failed: {0}")]
    Storage(#[from] StorageError),

    /// The store's schema still differs from the expected document after an update.
    #[error("schema doesn't match after update")]
    Mismatch,

    #[error("schema operation timed out after {0:?}")]
    TimedOut(Duration),
}
