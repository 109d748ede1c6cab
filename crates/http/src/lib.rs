//! HTTP API server for travel-sync.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;


use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use travel_sync_core::Config;
use travel_sync_service::{JobService, Loader};

pub use query_types::UploadFeedRequest;
pub use response_types::{ReadinessResponse, UploadFeedResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Background load jobs by trace id
    pub jobs: Arc<JobService>,
    /// Base URL of the graph store, probed by the readiness check
    pub store_url: String,
    /// Client for readiness probes
    pub probe: reqwest::Client,
    /// Build version reported by the readiness check
    pub version: String,
}

impl AppState {
    /// State for a server loading through `loader` into the store at `store_url`.
    #[must_use]
    pub fn new(loader: Arc<Loader>, store_url: impl Into<String>) -> Self {
        Self {
            jobs: Arc::new(JobService::new(loader)),
            store_url: store_url.into(),
            probe: reqwest::Client::new(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }

    /// State wired to the store and feeds named by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let loader = Loader::from_config(config)?;
        Ok(Self::new(Arc::new(loader), config.store.url.clone()))
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::checks::health))
        .route("/debug/readiness", get(handlers::checks::readiness))
        .route("/v1/feed/upload", post(handlers::feed::upload))
        .route("/v1/feed/jobs/{trace_id}", get(handlers::feed::job_status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
