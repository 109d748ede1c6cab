use serde::{Deserialize, Serialize};

use crate::record::{city_ref, null_as_default};

/// Current weather conditions for a city. At most one is linked per city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(rename = "city", with = "city_ref", default)]
    pub city_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visibility: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feels_like: f64,
    #[serde(rename = "temp_min", default, deserialize_with = "null_as_default")]
    pub min_temp: f64,
    #[serde(rename = "temp_max", default, deserialize_with = "null_as_default")]
    pub max_temp: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pressure: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub humidity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_speed: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_direction: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sunrise: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sunset: i64,
}
