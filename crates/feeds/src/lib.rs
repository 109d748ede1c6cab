//! External feed clients for travel-sync
//!
//! Places (paginated, rate limited), current weather and travel advisories.

pub mod advisory;
mod client;
pub mod error;
pub mod places;
pub mod weather;

mod feeds_tests;
mod places_tests;

pub use advisory::{AdvisoryApi, AdvisoryReport, TravelAdvisoryClient};
pub use client::FEED_REQUEST_TIMEOUT;
pub use error::FeedError;
pub use places::{
    GooglePlacesClient, NearbyPage, NearbyRequest, PacingPolicy, PlaceFilter, PlaceResult,
    PlaceSearch, PlacesApi,
};
pub use weather::{OpenWeatherClient, WeatherApi, WeatherReport};
