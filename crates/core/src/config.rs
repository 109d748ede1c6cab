//! Runtime configuration, read from `TRAVEL_*` environment variables.

use std::time::Duration;

use crate::constants::{DEFAULT_CATEGORIES, DEFAULT_RADIUS, LOAD_TIMEOUT, STORE_REQUEST_TIMEOUT};
use crate::env_config::{env_list_with_default, env_parse_with_default, env_string_with_default};

pub const DEFAULT_STORE_URL: &str = "http://0.0.0.0:8080";
pub const DEFAULT_AUTH_HEADER: &str = "X-Travel-Auth";
pub const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_ADVISORY_URL: &str = "https://www.travel-advisory.info/api";
pub const DEFAULT_UPLOAD_FEED_URL: &str = "http://0.0.0.0:3000/v1/feed/upload";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub auth_header: String,
    /// Sent in `auth_header` when non-empty.
    pub auth_token: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub categories: Vec<String>,
    /// Meters.
    pub radius: u32,
    /// Result pages fetched per category; `0` means no limit.
    pub pages_per_category: u32,
    pub run_timeout: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub maps: String,
    pub weather: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    pub places: String,
    pub weather: String,
    pub advisory: String,
    /// Endpoint the store's `uploadFeed` custom mutation forwards to.
    pub upload_feed: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    pub loader: LoaderConfig,
    pub keys: ApiKeys,
    pub urls: FeedUrls,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORE_URL.to_owned(),
            auth_header: DEFAULT_AUTH_HEADER.to_owned(),
            auth_token: String::new(),
            request_timeout: STORE_REQUEST_TIMEOUT,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| (*s).to_owned()).collect(),
            radius: DEFAULT_RADIUS,
            pages_per_category: 1,
            run_timeout: LOAD_TIMEOUT,
        }
    }
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self {
            places: DEFAULT_PLACES_URL.to_owned(),
            weather: DEFAULT_WEATHER_URL.to_owned(),
            advisory: DEFAULT_ADVISORY_URL.to_owned(),
            upload_feed: DEFAULT_UPLOAD_FEED_URL.to_owned(),
        }
    }
}

impl Config {
    /// Build a configuration from the environment. Missing or invalid values fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let store = StoreConfig {
            url: env_string_with_default("TRAVEL_STORE_URL", DEFAULT_STORE_URL),
            auth_header: env_string_with_default("TRAVEL_STORE_AUTH_HEADER", DEFAULT_AUTH_HEADER),
            auth_token: env_string_with_default("TRAVEL_STORE_AUTH_TOKEN", ""),
            request_timeout: Duration::from_secs(env_parse_with_default(
                "TRAVEL_STORE_TIMEOUT_SECS",
                STORE_REQUEST_TIMEOUT.as_secs(),
            )),
        };
        let loader = LoaderConfig {
            categories: env_list_with_default("TRAVEL_SEARCH_CATEGORIES", DEFAULT_CATEGORIES),
            radius: env_parse_with_default("TRAVEL_SEARCH_RADIUS", DEFAULT_RADIUS),
            pages_per_category: env_parse_with_default("TRAVEL_SEARCH_PAGES", 1),
            run_timeout: Duration::from_secs(env_parse_with_default(
                "TRAVEL_LOAD_TIMEOUT_SECS",
                LOAD_TIMEOUT.as_secs(),
            )),
        };
        let keys = ApiKeys {
            maps: env_string_with_default("TRAVEL_API_KEYS_MAPS_KEY", ""),
            weather: env_string_with_default("TRAVEL_API_KEYS_WEATHER_KEY", ""),
        };
        let urls = FeedUrls {
            places: env_string_with_default("TRAVEL_URL_PLACES", DEFAULT_PLACES_URL),
            weather: env_string_with_default("TRAVEL_URL_WEATHER", DEFAULT_WEATHER_URL),
            advisory: env_string_with_default("TRAVEL_URL_ADVISORY", DEFAULT_ADVISORY_URL),
            upload_feed: env_string_with_default("TRAVEL_UPLOAD_FEED_URL", DEFAULT_UPLOAD_FEED_URL),
        };
        Self { store, loader, keys, urls }
    }
}
