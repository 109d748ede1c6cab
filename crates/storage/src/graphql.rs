//! Minimal GraphQL-over-HTTP client for the graph store.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use travel_sync_core::config::StoreConfig;

use crate::error::StorageError;

/// Endpoint a document is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Queries and mutations against the data.
    GraphQl,
    /// Schema administration.
    Admin,
}

impl Endpoint {
    const fn path(self) -> &'static str {
        match self {
            Self::GraphQl => "graphql",
            Self::Admin => "admin",
        }
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Client for a GraphQL endpoint of the graph store.
pub struct GraphQlClient {
    client: reqwest::Client,
    base_url: String,
    auth: Option<(String, String)>,
}

impl std::fmt::Debug for GraphQlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.as_ref().map(|(name, _)| (name, "***")))
            .finish()
    }
}

impl GraphQlClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: &StoreConfig) -> Result<Self, StorageError> {
        Self::with_timeout(config, config.request_timeout)
    }

    /// Same as [`GraphQlClient::new`] with an explicit per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(config: &StoreConfig, timeout: Duration) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let auth = (!config.auth_token.is_empty())
            .then(|| (config.auth_header.clone(), config.auth_token.clone()));
        Ok(Self { client, base_url: config.url.trim_end_matches('/').to_owned(), auth })
    }

    /// Execute a document and decode its `data` member into `T`.
    ///
    /// The first entry of a non-empty `errors` array is the operation's failure.
    ///
    /// # Errors
    /// Transport failure, non-success status, store-reported error, or an
    /// undecodable payload.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        document: &str,
        variables: Value,
    ) -> Result<T, StorageError> {
        tracing::debug!(endpoint = endpoint.path(), document = %collapse_whitespace(document), "graphql request");

        let url = format!("{}/{}", self.base_url, endpoint.path());
        let mut request = self
            .client
            .post(url)
            .json(&serde_json::json!({ "query": document, "variables": variables }));
        if let Some((name, token)) = &self.auth {
            request = request.header(name.as_str(), token.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StorageError::Status { code: status.as_u16(), body });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|source| StorageError::Decode {
                context: format!("graphql response (body: {})", truncate(&body, 200)),
                source,
            })?;

        if let Some(first) = envelope.errors.into_iter().next() {
            return Err(StorageError::Operation(first.message));
        }
        envelope.data.ok_or_else(|| StorageError::Operation("response carried no data".to_owned()))
    }
}

/// Collapse runs of whitespace so multi-line documents log on one line.
#[must_use]
pub fn collapse_whitespace(document: &str) -> String {
    document.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    s.get(..end).unwrap_or("")
}
