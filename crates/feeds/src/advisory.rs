//! Country safety scores from a travel-advisory.info-compatible API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{build_http_client, fetch_json};
use crate::error::FeedError;

/// Advisory for one country as reported by the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisoryReport {
    pub country: String,
    pub country_code: String,
    pub continent: String,
    pub score: f64,
    pub last_updated: String,
    pub message: String,
    pub source: String,
}

#[async_trait]
pub trait AdvisoryApi: Send + Sync {
    async fn advisory(&self, country_code: &str) -> Result<AdvisoryReport, FeedError>;
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct RawCountry {
    #[serde(default)]
    iso_alpha2: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    continent: String,
    advisory: RawAdvisory,
}

#[derive(Deserialize)]
struct RawAdvisory {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    updated: String,
    #[serde(default)]
    source: String,
}

/// Client for the travel-advisory.info API.
#[derive(Debug)]
pub struct TravelAdvisoryClient {
    client: reqwest::Client,
    url: String,
}

impl TravelAdvisoryClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, FeedError> {
        Ok(Self { client: build_http_client()?, url: url.to_owned() })
    }
}

#[async_trait]
impl AdvisoryApi for TravelAdvisoryClient {
    async fn advisory(&self, country_code: &str) -> Result<AdvisoryReport, FeedError> {
        let raw: RawResponse = fetch_json(
            self.client.get(&self.url).query(&[("countrycode", country_code)]),
            "advisory search",
        )
        .await?;

        let entry = raw
            .data
            .as_object()
            .and_then(|countries| {
                countries.iter().find(|(code, _)| code.eq_ignore_ascii_case(country_code))
            })
            .map(|(_, entry)| entry.clone())
            .ok_or_else(|| FeedError::CountryNotFound(country_code.to_owned()))?;

        let country: RawCountry = serde_json::from_value(entry).map_err(|source| FeedError::Decode {
            context: format!("advisory entry for {country_code}"),
            source,
        })?;

        Ok(AdvisoryReport {
            country: country.name,
            country_code: country.iso_alpha2,
            continent: country.continent,
            score: country.advisory.score,
            last_updated: country.advisory.updated,
            message: country.advisory.message,
            source: country.advisory.source,
        })
    }
}
