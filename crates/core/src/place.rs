use serde::{Deserialize, Serialize};

use crate::record::{city_ref, null_as_default};

/// A point of interest near a city, as captured from the places feed.
///
/// Field names follow the graph schema so store payloads decode directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Id assigned by the external places API.
    #[serde(rename = "place_id")]
    pub external_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "city", with = "city_ref", default)]
    pub city_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city_name: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_type: Vec<String>,
    #[serde(rename = "avg_user_rating", default, deserialize_with = "null_as_default")]
    pub avg_rating: f32,
    #[serde(rename = "no_user_rating", default, deserialize_with = "null_as_default")]
    pub num_ratings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gmaps_url: String,
    #[serde(rename = "photo_id", default, deserialize_with = "null_as_default")]
    pub photo_reference_id: String,
}

/// Uniqueness key for places: the external place id scoped to its city.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceKey {
    pub city_id: String,
    pub external_id: String,
}

impl PlaceKey {
    #[must_use]
    pub fn of(place: &Place) -> Self {
        Self { city_id: place.city_id.clone(), external_id: place.external_id.clone() }
    }
}

impl std::fmt::Display for PlaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.city_id, self.external_id)
    }
}
