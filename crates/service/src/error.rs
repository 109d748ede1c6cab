//! Typed error enums for the service layer.
//!
//! Every failure keeps the operation it interrupted and the underlying
//! source, so callers can both log a readable chain and classify it.

use std::time::Duration;

use thiserror::Error;
use travel_sync_feeds::FeedError;
use travel_sync_storage::StorageError;

use crate::loader::LoadStage;
use crate::replace::ReplaceError;

/// Coarse classification of a service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    TransientNetwork,
    DeadlineExceeded,
    RateLimited,
    StoreOperationFailed,
    /// A feed answered but its payload was unusable.
    UpstreamFailed,
    InvalidInput,
}

/// Service-layer error unifying store and feed failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{op}: {source}")]
    Store {
        op: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("{op}: {source}")]
    Feed {
        op: &'static str,
        #[source]
        source: FeedError,
    },

    #[error(transparent)]
    Replace(#[from] ReplaceError),

    /// Caller provided invalid input (empty name, missing external id).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl ServiceError {
    /// Wrap a store error with the operation it interrupted.
    pub fn store(op: &'static str) -> impl FnOnce(StorageError) -> Self {
        move |source| Self::Store { op, source }
    }

    /// Wrap a feed error with the operation it interrupted.
    pub fn feed(op: &'static str) -> impl FnOnce(FeedError) -> Self {
        move |source| Self::Feed { op, source }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store { source, .. } => storage_kind(source),
            Self::Replace(e) => storage_kind(&e.source),
            Self::Feed { source, .. } => feed_kind(source),
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
        }
    }

    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TransientNetwork | ErrorKind::RateLimited | ErrorKind::DeadlineExceeded
        )
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

fn storage_kind(err: &StorageError) -> ErrorKind {
    if err.is_not_found() {
        ErrorKind::NotFound
    } else if err.is_timeout() {
        ErrorKind::DeadlineExceeded
    } else if err.is_transient() {
        ErrorKind::TransientNetwork
    } else {
        ErrorKind::StoreOperationFailed
    }
}

fn feed_kind(err: &FeedError) -> ErrorKind {
    match err {
        FeedError::InvalidRequest(_) | FeedError::RateLimited(_) => ErrorKind::RateLimited,
        FeedError::Http(e) if e.is_timeout() => ErrorKind::DeadlineExceeded,
        FeedError::CountryNotFound(_) => ErrorKind::NotFound,
        e if e.is_transient() => ErrorKind::TransientNetwork,
        _ => ErrorKind::UpstreamFailed,
    }
}

/// A synchronization run stopped at `stage`.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct LoadError {
    pub stage: LoadStage,
    #[source]
    pub source: ServiceError,
}

impl LoadError {
    /// Attach the failing stage to a service error.
    pub fn at(stage: LoadStage) -> impl FnOnce(ServiceError) -> Self {
        move |source| Self { stage, source }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}
