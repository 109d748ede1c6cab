//! Stores and feeds for exercising the pipeline without a network.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use travel_sync_core::{Advisory, City, Place, PlaceKey, Stored, Weather};
use travel_sync_feeds::{
    AdvisoryApi, AdvisoryReport, FeedError, NearbyPage, NearbyRequest, PacingPolicy, PlaceResult, PlacesApi,
    WeatherApi, WeatherReport,
};
use travel_sync_storage::{GraphStore, MemoryStore, StorageError};

use crate::loader::Feeds;

/// Wraps a [`MemoryStore`], failing each armed operation exactly once.
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    armed: Mutex<HashSet<&'static str>>,
}

impl FailingStore {
    pub fn fail_once(&self, op: &'static str) {
        self.armed.lock().unwrap().insert(op);
    }

    fn check(&self, op: &'static str) -> Result<(), StorageError> {
        if self.armed.lock().unwrap().remove(op) {
            return Err(StorageError::Status { code: 503, body: format!("{op} unavailable") });
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for FailingStore {
    async fn city_by_name(&self, name: &str) -> Result<Option<Stored<City>>, StorageError> {
        self.check("city_by_name")?;
        self.inner.city_by_name(name).await
    }

    async fn city_by_id(&self, id: &str) -> Result<Option<Stored<City>>, StorageError> {
        self.check("city_by_id")?;
        self.inner.city_by_id(id).await
    }

    async fn add_city(&self, city: &City) -> Result<String, StorageError> {
        self.check("add_city")?;
        self.inner.add_city(city).await
    }

    async fn place_by_key(&self, key: &PlaceKey) -> Result<Option<Stored<Place>>, StorageError> {
        self.check("place_by_key")?;
        self.inner.place_by_key(key).await
    }

    async fn places_by_city(&self, city_id: &str) -> Result<Vec<Stored<Place>>, StorageError> {
        self.check("places_by_city")?;
        self.inner.places_by_city(city_id).await
    }

    async fn add_place(&self, place: &Place) -> Result<String, StorageError> {
        self.check("add_place")?;
        self.inner.add_place(place).await
    }

    async fn link_place(&self, city_id: &str, place_id: &str) -> Result<(), StorageError> {
        self.check("link_place")?;
        self.inner.link_place(city_id, place_id).await
    }

    async fn weather_for_city(&self, city_id: &str) -> Result<Option<Stored<Weather>>, StorageError> {
        self.check("weather_for_city")?;
        self.inner.weather_for_city(city_id).await
    }

    async fn weathers_referencing(&self, city_id: &str) -> Result<Vec<Stored<Weather>>, StorageError> {
        self.check("weathers_referencing")?;
        self.inner.weathers_referencing(city_id).await
    }

    async fn add_weather(&self, weather: &Weather) -> Result<String, StorageError> {
        self.check("add_weather")?;
        self.inner.add_weather(weather).await
    }

    async fn delete_weather(&self, id: &str) -> Result<u64, StorageError> {
        self.check("delete_weather")?;
        self.inner.delete_weather(id).await
    }

    async fn link_weather(&self, city_id: &str, weather_id: &str) -> Result<(), StorageError> {
        self.check("link_weather")?;
        self.inner.link_weather(city_id, weather_id).await
    }

    async fn advisory_for_city(&self, city_id: &str) -> Result<Option<Stored<Advisory>>, StorageError> {
        self.check("advisory_for_city")?;
        self.inner.advisory_for_city(city_id).await
    }

    async fn advisories_referencing(&self, city_id: &str) -> Result<Vec<Stored<Advisory>>, StorageError> {
        self.check("advisories_referencing")?;
        self.inner.advisories_referencing(city_id).await
    }

    async fn add_advisory(&self, advisory: &Advisory) -> Result<String, StorageError> {
        self.check("add_advisory")?;
        self.inner.add_advisory(advisory).await
    }

    async fn delete_advisory(&self, id: &str) -> Result<u64, StorageError> {
        self.check("delete_advisory")?;
        self.inner.delete_advisory(id).await
    }

    async fn link_advisory(&self, city_id: &str, advisory_id: &str) -> Result<(), StorageError> {
        self.check("link_advisory")?;
        self.inner.link_advisory(city_id, advisory_id).await
    }
}

/// Places feed serving fixed pages per keyword. Page `n` carries token `"{keyword}-{n}"`.
#[derive(Default)]
pub struct StubPlaces {
    pages: HashMap<String, Vec<Vec<&'static str>>>,
    pub requests: Mutex<Vec<NearbyRequest>>,
}

impl StubPlaces {
    pub fn with(mut self, keyword: &str, pages: Vec<Vec<&'static str>>) -> Self {
        self.pages.insert(keyword.to_owned(), pages);
        self
    }
}

#[async_trait]
impl PlacesApi for StubPlaces {
    async fn nearby_search(&self, request: &NearbyRequest) -> Result<NearbyPage, FeedError> {
        self.requests.lock().unwrap().push(request.clone());
        let Some(pages) = self.pages.get(&request.keyword) else {
            return Ok(NearbyPage::default());
        };
        let index = request
            .page_token
            .as_deref()
            .and_then(|t| t.rsplit('-').next())
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        let results = pages
            .get(index)
            .map(|ids| {
                ids.iter()
                    .map(|id| PlaceResult {
                        place_id: (*id).to_owned(),
                        name: format!("place {id}"),
                        types: vec![request.keyword.clone()],
                        ..PlaceResult::default()
                    })
                    .collect()
            })
            .unwrap_or_default();
        let next_page_token =
            if index + 1 < pages.len() { format!("{}-{}", request.keyword, index + 1) } else { String::new() };
        Ok(NearbyPage { results, next_page_token })
    }
}

/// Weather feed whose description counts the calls made, optionally slow.
#[derive(Default)]
pub struct StubWeather {
    calls: AtomicU32,
    delay: Option<Duration>,
}

impl StubWeather {
    pub fn slow(delay: Duration) -> Self {
        Self { calls: AtomicU32::new(0), delay: Some(delay) }
    }
}

#[async_trait]
impl WeatherApi for StubWeather {
    async fn current(&self, _lat: f64, _lng: f64) -> Result<WeatherReport, FeedError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(WeatherReport { description: format!("report {call}"), temp: 21.5, ..WeatherReport::default() })
    }
}

/// Advisory feed knowing only the listed countries.
pub struct StubAdvisory {
    pub known: Vec<&'static str>,
}

#[async_trait]
impl AdvisoryApi for StubAdvisory {
    async fn advisory(&self, country_code: &str) -> Result<AdvisoryReport, FeedError> {
        if !self.known.iter().any(|c| c.eq_ignore_ascii_case(country_code)) {
            return Err(FeedError::CountryNotFound(country_code.to_owned()));
        }
        Ok(AdvisoryReport {
            country: "Australia".to_owned(),
            country_code: country_code.to_owned(),
            continent: "OC".to_owned(),
            score: 2.8,
            ..AdvisoryReport::default()
        })
    }
}

pub fn feeds(places: StubPlaces, weather: StubWeather) -> Feeds {
    Feeds {
        places: Arc::new(places),
        weather: Arc::new(weather),
        advisory: Arc::new(StubAdvisory { known: vec!["AU", "US"] }),
    }
}

pub fn weather(description: &str) -> Weather {
    Weather { description: description.to_owned(), ..Weather::default() }
}

pub const NO_PACING: PacingPolicy =
    PacingPolicy { page_delay: Duration::ZERO, retry_delay: Duration::ZERO, max_attempts: 3 };
