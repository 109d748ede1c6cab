use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::FeedError;

/// Per-request timeout for feed API calls.
pub const FEED_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_http_client() -> Result<reqwest::Client, FeedError> {
    reqwest::Client::builder()
        .timeout(FEED_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| FeedError::ClientInit(e.to_string()))
}

/// Send a request and decode a successful JSON body.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    context: &str,
) -> Result<T, FeedError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FeedError::Status { code: status.as_u16(), body });
    }
    serde_json::from_str(&body).map_err(|source| FeedError::Decode {
        context: format!("{context} (body: {})", truncate(&body, 200)),
        source,
    })
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
