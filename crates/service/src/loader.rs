//! The city synchronization run.
//!
//! ```text
//! Started -> CityResolved -> WeatherReplaced -> AdvisoryReplaced -> PlacesSynced -> Done
//!     \____________\_______________\________________\__________________> Failed(stage)
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::Instrument;
use travel_sync_core::config::LoaderConfig;
use travel_sync_core::{City, Search, Stored, Upserted};
use travel_sync_feeds::{AdvisoryApi, PacingPolicy, PlaceFilter, PlaceSearch, PlacesApi, WeatherApi};
use travel_sync_storage::GraphStore;

use crate::city_service::CityService;
use crate::locks::KeyedLocks;
use crate::marshal;
use crate::place_service::PlaceService;
use crate::replace::{AdvisoryRelation, Replacer, WeatherRelation};
use crate::{LoadError, ServiceError};

/// Step of a run that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    City,
    Weather,
    Advisory,
    Places,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::City => "adding city",
            Self::Weather => "replacing weather",
            Self::Advisory => "replacing advisory",
            Self::Places => "adding places",
        })
    }
}

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Started,
    CityResolved,
    WeatherReplaced,
    AdvisoryReplaced,
    PlacesSynced,
    Done,
    Failed(LoadStage),
}

impl LoadState {
    /// The step a run in this state is working on.
    #[must_use]
    pub const fn pending_stage(self) -> LoadStage {
        match self {
            Self::Started => LoadStage::City,
            Self::CityResolved => LoadStage::Weather,
            Self::WeatherReplaced => LoadStage::Advisory,
            Self::AdvisoryReplaced | Self::PlacesSynced | Self::Done => LoadStage::Places,
            Self::Failed(stage) => stage,
        }
    }
}

/// Per-category place counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub category: String,
    pub pages: u32,
    pub added: u32,
    pub existing: u32,
    pub skipped: u32,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub city: Stored<City>,
    pub city_created: bool,
    pub weather_id: String,
    pub advisory_id: String,
    pub categories: Vec<CategoryReport>,
}

/// The external feeds a run pulls from.
#[derive(Clone)]
pub struct Feeds {
    pub places: Arc<dyn PlacesApi>,
    pub weather: Arc<dyn WeatherApi>,
    pub advisory: Arc<dyn AdvisoryApi>,
}

/// Synchronizes one city at a time from the feeds into the store.
pub struct Loader {
    cities: CityService,
    places: PlaceService,
    weather: Replacer<WeatherRelation>,
    advisory: Replacer<AdvisoryRelation>,
    feeds: Feeds,
    config: LoaderConfig,
    pacing: PacingPolicy,
    runs: KeyedLocks,
}

impl Loader {
    #[must_use]
    pub fn new(store: Arc<dyn GraphStore>, feeds: Feeds, config: LoaderConfig) -> Self {
        Self {
            cities: CityService::new(Arc::clone(&store)),
            places: PlaceService::new(Arc::clone(&store)),
            weather: Replacer::new(Arc::clone(&store), WeatherRelation),
            advisory: Replacer::new(store, AdvisoryRelation),
            feeds,
            config,
            pacing: PacingPolicy::default(),
            runs: KeyedLocks::new(),
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run a full synchronization for `search`.
    pub async fn update_data(&self, trace_id: &str, search: &Search) -> Result<LoadReport, LoadError> {
        self.update_data_observed(trace_id, search, |_| {}).await
    }

    /// Same as [`Loader::update_data`], reporting every state transition to `observe`.
    ///
    /// Runs for the same city name are serialized. The run is bounded by the
    /// configured deadline, time spent queued behind another run included; on
    /// expiry the in-flight step is dropped and the error names it.
    pub async fn update_data_observed(
        &self,
        trace_id: &str,
        search: &Search,
        observe: impl Fn(LoadState) + Send + Sync,
    ) -> Result<LoadReport, LoadError> {
        let progress = Progress { last: Mutex::new(LoadState::Started), observe: &observe };
        let span = tracing::info_span!("load", trace_id, city = %search.city_name);
        async {
            let result = self.run(search, &progress).await;
            match &result {
                Ok(report) => {
                    progress.set(LoadState::Done);
                    tracing::info!(city_id = %report.city.id, created = report.city_created, "load finished");
                },
                Err(e) => {
                    progress.set(LoadState::Failed(e.stage));
                    tracing::error!(stage = %e.stage, error = %e, "load failed");
                },
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, search: &Search, progress: &Progress<'_>) -> Result<LoadReport, LoadError> {
        search
            .validate()
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))
            .map_err(LoadError::at(LoadStage::City))?;

        let locked_sync = async {
            let _guard = self.runs.lock(&search.city_name).await;
            progress.set(LoadState::Started);
            tracing::info!(country = %search.country_code, lat = search.lat, lng = search.lng, "load started");
            self.sync(search, progress).await
        };

        match tokio::time::timeout(self.config.run_timeout, locked_sync).await {
            Ok(result) => result,
            Err(_) => Err(LoadError {
                stage: progress.get().pending_stage(),
                source: ServiceError::DeadlineExceeded(self.config.run_timeout),
            }),
        }
    }

    async fn sync(&self, search: &Search, progress: &Progress<'_>) -> Result<LoadReport, LoadError> {
        let city = self.cities.upsert(marshal::city(search)).await.map_err(LoadError::at(LoadStage::City))?;
        let city_created = !city.is_existing();
        let city = city.into_inner();
        if city_created {
            tracing::info!(city_id = %city.id, "added city");
        } else {
            tracing::info!(city_id = %city.id, "city existed");
        }
        progress.set(LoadState::CityResolved);

        let weather_id = self.replace_weather(&city).await.map_err(LoadError::at(LoadStage::Weather))?;
        progress.set(LoadState::WeatherReplaced);

        let advisory_id = self
            .replace_advisory(&city, &search.country_code)
            .await
            .map_err(LoadError::at(LoadStage::Advisory))?;
        progress.set(LoadState::AdvisoryReplaced);

        let mut categories = Vec::with_capacity(self.config.categories.len());
        for category in &self.config.categories {
            let report = self.sync_category(&city, category).await.map_err(LoadError::at(LoadStage::Places))?;
            categories.push(report);
        }
        progress.set(LoadState::PlacesSynced);

        Ok(LoadReport { city, city_created, weather_id, advisory_id, categories })
    }

    async fn replace_weather(&self, city: &Stored<City>) -> Result<String, ServiceError> {
        let report =
            self.feeds.weather.current(city.lat, city.lng).await.map_err(ServiceError::feed("searching weather"))?;
        let weather = self.weather.replace(&city.id, marshal::weather(report, &city.id)).await?;
        tracing::info!(weather_id = %weather.id, description = %weather.description, "replaced weather");
        Ok(weather.id)
    }

    async fn replace_advisory(&self, city: &Stored<City>, country_code: &str) -> Result<String, ServiceError> {
        let report =
            self.feeds.advisory.advisory(country_code).await.map_err(ServiceError::feed("searching advisory"))?;
        let advisory = self.advisory.replace(&city.id, marshal::advisory(report, &city.id)).await?;
        tracing::info!(advisory_id = %advisory.id, score = advisory.score, "replaced advisory");
        Ok(advisory.id)
    }

    async fn sync_category(&self, city: &Stored<City>, category: &str) -> Result<CategoryReport, ServiceError> {
        let filter = PlaceFilter {
            lat: city.lat,
            lng: city.lng,
            keyword: category.to_owned(),
            radius: self.config.radius,
        };
        tracing::debug!(category, radius = filter.radius, "searching places");
        let mut pages = PlaceSearch::new(Arc::clone(&self.feeds.places), filter, self.pacing)
            .with_page_limit(self.config.pages_per_category);
        let mut report = CategoryReport { category: category.to_owned(), ..CategoryReport::default() };

        while let Some(batch) = pages.next_page().await.map_err(ServiceError::feed("searching places"))? {
            for result in batch {
                let place = marshal::place(result, &city.id, &city.name, category);
                match self.places.upsert(&city.id, place).await {
                    Ok(Upserted::Created(place)) => {
                        tracing::debug!(place = %place.name, id = %place.id, "added place");
                        report.added += 1;
                    },
                    Ok(Upserted::Existing(place)) => {
                        tracing::debug!(place = %place.name, id = %place.id, "place existed");
                        report.existing += 1;
                    },
                    Err(ServiceError::InvalidInput(reason)) => {
                        tracing::warn!(category, %reason, "skipping place");
                        report.skipped += 1;
                    },
                    Err(e) => return Err(e),
                }
            }
        }
        report.pages = pages.pages_fetched();
        tracing::info!(
            category,
            added = report.added,
            existing = report.existing,
            skipped = report.skipped,
            "synced places"
        );
        Ok(report)
    }
}

struct Progress<'a> {
    last: Mutex<LoadState>,
    observe: &'a (dyn Fn(LoadState) + Send + Sync),
}

impl Progress<'_> {
    fn set(&self, state: LoadState) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = state;
        (self.observe)(state);
    }

    fn get(&self) -> LoadState {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
