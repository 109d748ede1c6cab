//! Places search: the nearby-search API and its pacing-aware paginator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::Stream;
use serde::Deserialize;
use travel_sync_core::constants::{PLACES_MAX_ATTEMPTS, PLACES_PAGE_DELAY, PLACES_RETRY_DELAY};

use crate::client::{build_http_client, fetch_json};
use crate::error::FeedError;

/// One nearby-search request. `page_token` continues a previous search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub lat: f64,
    pub lng: f64,
    pub keyword: String,
    /// Meters.
    pub radius: u32,
    pub page_token: Option<String>,
}

/// A place as reported by the places feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub types: Vec<String>,
    pub rating: f32,
    pub user_ratings_total: u32,
    pub gmaps_url: String,
    /// Reference of the first photo, empty when the place has none.
    pub photo_reference: String,
}

/// One page of results. An empty `next_page_token` means the search is exhausted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyPage {
    pub results: Vec<PlaceResult>,
    pub next_page_token: String,
}

/// Nearby search against a places API.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyPage, FeedError>;
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    results: Vec<RawPlace>,
    #[serde(default)]
    next_page_token: String,
    status: String,
    #[serde(default)]
    error_message: String,
}

#[derive(Deserialize)]
struct RawPlace {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    geometry: RawGeometry,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    rating: f32,
    #[serde(default)]
    user_ratings_total: u32,
    #[serde(default)]
    photos: Vec<RawPhoto>,
}

#[derive(Deserialize)]
struct RawGeometry {
    location: RawLatLng,
}

#[derive(Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawPhoto {
    photo_reference: String,
}

impl From<RawPlace> for PlaceResult {
    fn from(raw: RawPlace) -> Self {
        let photo_reference =
            raw.photos.into_iter().next().map(|p| p.photo_reference).unwrap_or_default();
        let gmaps_url = format!("https://www.google.com/maps/place/?q=place_id:{}", raw.place_id);
        Self {
            address: raw.formatted_address.or(raw.vicinity).unwrap_or_default(),
            lat: raw.geometry.location.lat,
            lng: raw.geometry.location.lng,
            place_id: raw.place_id,
            name: raw.name,
            types: raw.types,
            rating: raw.rating,
            user_ratings_total: raw.user_ratings_total,
            gmaps_url,
            photo_reference,
        }
    }
}

/// Client for the Google Places nearby-search endpoint.
pub struct GooglePlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

impl GooglePlacesClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str) -> Result<Self, FeedError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        })
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyPage, FeedError> {
        let mut query = vec![
            ("location", format!("{},{}", request.lat, request.lng)),
            ("radius", request.radius.to_string()),
            ("keyword", request.keyword.clone()),
            ("key", self.api_key.clone()),
        ];
        if let Some(token) = &request.page_token {
            query.push(("pagetoken", token.clone()));
        }

        let raw: RawResponse = fetch_json(
            self.client.get(format!("{}/nearbysearch/json", self.base_url)).query(&query),
            "places nearby search",
        )
        .await?;

        match raw.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(NearbyPage {
                results: raw.results.into_iter().map(PlaceResult::from).collect(),
                next_page_token: raw.next_page_token,
            }),
            "INVALID_REQUEST" => Err(FeedError::InvalidRequest(raw.error_message)),
            "OVER_QUERY_LIMIT" => Err(FeedError::RateLimited(raw.error_message)),
            "REQUEST_DENIED" => Err(FeedError::InvalidApiKey),
            _ => Err(FeedError::Api { status: raw.status, message: raw.error_message }),
        }
    }
}

/// What to search for around a point.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceFilter {
    pub lat: f64,
    pub lng: f64,
    pub keyword: String,
    pub radius: u32,
}

/// Pacing between pages and backoff for rejected pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Wait before every page after the first.
    pub page_delay: Duration,
    /// Wait before retrying a page rejected as premature or rate limited.
    pub retry_delay: Duration,
    /// Attempts per page, including the first.
    pub max_attempts: u32,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            page_delay: PLACES_PAGE_DELAY,
            retry_delay: PLACES_RETRY_DELAY,
            max_attempts: PLACES_MAX_ATTEMPTS,
        }
    }
}

/// Lazily walks the pages of one places search.
///
/// The first page is requested immediately; every later page waits
/// `page_delay`. Empty pages are skipped, and the search ends once the API
/// returns no continuation token or the page limit is reached.
pub struct PlaceSearch {
    api: Arc<dyn PlacesApi>,
    filter: PlaceFilter,
    policy: PacingPolicy,
    page_token: Option<String>,
    page_limit: Option<u32>,
    pages_fetched: u32,
    exhausted: bool,
}

impl PlaceSearch {
    #[must_use]
    pub fn new(api: Arc<dyn PlacesApi>, filter: PlaceFilter, policy: PacingPolicy) -> Self {
        Self {
            api,
            filter,
            policy,
            page_token: None,
            page_limit: None,
            pages_fetched: 0,
            exhausted: false,
        }
    }

    /// Stop after `limit` API pages. `0` means no limit.
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = if limit == 0 { None } else { Some(limit) };
        self
    }

    /// Number of pages requested from the API so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// The next non-empty batch, or `None` once the search is exhausted.
    ///
    /// # Errors
    /// The last error once a page has failed `max_attempts` times, or any
    /// error that is not a pacing rejection.
    pub async fn next_page(&mut self) -> Result<Option<Vec<PlaceResult>>, FeedError> {
        while !self.exhausted {
            if self.page_limit.is_some_and(|limit| self.pages_fetched >= limit) {
                self.exhausted = true;
                break;
            }
            if self.pages_fetched > 0 {
                tokio::time::sleep(self.policy.page_delay).await;
            }
            let page = self.fetch_with_retry().await?;
            self.pages_fetched += 1;

            if page.next_page_token.is_empty() {
                self.exhausted = true;
                self.page_token = None;
            } else {
                self.page_token = Some(page.next_page_token);
            }
            if !page.results.is_empty() {
                return Ok(Some(page.results));
            }
        }
        Ok(None)
    }

    /// Consume the search as a stream of batches. The stream ends after the
    /// first error.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<Vec<PlaceResult>, FeedError>> + Send {
        async_stream::try_stream! {
            while let Some(batch) = self.next_page().await? {
                yield batch;
            }
        }
    }

    async fn fetch_with_retry(&self) -> Result<NearbyPage, FeedError> {
        let request = NearbyRequest {
            lat: self.filter.lat,
            lng: self.filter.lng,
            keyword: self.filter.keyword.clone(),
            radius: self.filter.radius,
            page_token: self.page_token.clone(),
        };
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.api.nearby_search(&request).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_rate_limited() && attempt < max_attempts => {
                    tracing::warn!(
                        keyword = %self.filter.keyword,
                        attempt,
                        max_attempts,
                        error = %e,
                        "places page rejected, retrying"
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                    attempt += 1;
                },
                Err(e) => return Err(e),
            }
        }
    }
}
