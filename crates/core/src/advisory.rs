use serde::{Deserialize, Serialize};

use crate::record::{city_ref, null_as_default};

/// Advisory scores below this are flagged unsafe for travel.
pub const SAFE_SCORE_THRESHOLD: f64 = 4.0;

/// Travel advisory for the country a city belongs to. At most one is
/// linked per city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    #[serde(rename = "city", with = "city_ref", default)]
    pub city_id: String,
    pub country: String,
    pub country_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continent: String,
    /// 0 to 5.
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_updated: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

impl Advisory {
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.score >= SAFE_SCORE_THRESHOLD
    }
}
