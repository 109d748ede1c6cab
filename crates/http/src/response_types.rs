//! Response types (Serialize)

use serde::{Deserialize, Serialize};
use travel_sync_core::Search;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadFeedResponse {
    pub country_code: String,
    pub city_name: String,
    pub lat: f64,
    pub lng: f64,
    pub message: String,
    pub trace_id: String,
}

impl UploadFeedResponse {
    #[must_use]
    pub fn accepted(search: Search, trace_id: String) -> Self {
        let message = format!(
            "Uploading data for city {:?} [{:.6},{:.6}] in country {:?}",
            search.city_name, search.lat, search.lng, search.country_code
        );
        Self {
            country_code: search.country_code,
            city_name: search.city_name,
            lat: search.lat,
            lng: search.lng,
            message,
            trace_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub version: String,
    pub status: String,
}
