use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A city to synchronize. All fields must be populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Search {
    pub city_name: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,
}

impl Search {
    #[must_use]
    pub fn new(city_name: impl Into<String>, country_code: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self { city_name: city_name.into(), country_code: country_code.into(), lat, lng }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.city_name.trim().is_empty() {
            return Err(ValidationError::MissingField("city_name"));
        }
        if self.country_code.trim().is_empty() {
            return Err(ValidationError::MissingField("country_code"));
        }
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(ValidationError::OutOfRange { field: "lat", value: self.lat.to_string() });
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(ValidationError::OutOfRange { field: "lng", value: self.lng.to_string() });
        }
        Ok(())
    }
}
