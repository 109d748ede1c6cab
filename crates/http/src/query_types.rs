//! Request types (Deserialize)

use serde::Deserialize;
use travel_sync_core::Search;

/// Body of the feed upload trigger, as sent by the store's `uploadFeed` mutation.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadFeedRequest {
    #[serde(rename = "countrycode")]
    pub country_code: String,
    #[serde(rename = "cityname")]
    pub city_name: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<UploadFeedRequest> for Search {
    fn from(req: UploadFeedRequest) -> Self {
        Self::new(req.city_name, req.country_code, req.lat, req.lng)
    }
}
