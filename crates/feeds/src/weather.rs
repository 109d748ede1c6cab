//! Current conditions from an OpenWeatherMap-compatible API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{build_http_client, fetch_json};
use crate::error::FeedError;

/// Current weather as reported by the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    pub city_name: String,
    pub visibility: String,
    pub description: String,
    pub temp: f64,
    pub feels_like: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub pressure: i64,
    pub humidity: i64,
    pub wind_speed: f64,
    pub wind_direction: i64,
    pub sunrise: i64,
    pub sunset: i64,
}

#[async_trait]
pub trait WeatherApi: Send + Sync {
    async fn current(&self, lat: f64, lng: f64) -> Result<WeatherReport, FeedError>;
}

#[derive(Deserialize)]
struct RawWeather {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    weather: Vec<RawSky>,
    #[serde(default)]
    main: RawMain,
    #[serde(default)]
    wind: RawWind,
    #[serde(default)]
    sys: RawSys,
}

#[derive(Deserialize)]
struct RawSky {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Default)]
struct RawMain {
    #[serde(default)]
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
    #[serde(default)]
    pressure: i64,
    #[serde(default)]
    humidity: i64,
}

#[derive(Deserialize, Default)]
struct RawWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: i64,
}

#[derive(Deserialize, Default)]
struct RawSys {
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

impl From<RawWeather> for WeatherReport {
    fn from(raw: RawWeather) -> Self {
        let (visibility, description) =
            raw.weather.into_iter().next().map(|s| (s.main, s.description)).unwrap_or_default();
        Self {
            city_name: raw.name,
            visibility,
            description,
            temp: raw.main.temp,
            feels_like: raw.main.feels_like,
            min_temp: raw.main.temp_min,
            max_temp: raw.main.temp_max,
            pressure: raw.main.pressure,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            wind_direction: raw.wind.deg,
            sunrise: raw.sys.sunrise,
            sunset: raw.sys.sunset,
        }
    }
}

/// Client for the OpenWeatherMap current-weather endpoint.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("url", &self.url)
            .field("api_key", &"***")
            .finish()
    }
}

impl OpenWeatherClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, url: &str) -> Result<Self, FeedError> {
        Ok(Self { client: build_http_client()?, url: url.to_owned(), api_key })
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current(&self, lat: f64, lng: f64) -> Result<WeatherReport, FeedError> {
        let query = [("appid", self.api_key.clone()), ("lat", lat.to_string()), ("lon", lng.to_string())];
        let raw: RawWeather =
            fetch_json(self.client.get(&self.url).query(&query), "weather search").await?;
        if raw.id == 0 {
            return Err(FeedError::InvalidApiKey);
        }
        Ok(raw.into())
    }
}
