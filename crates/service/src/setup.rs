//! Wiring from configuration to live clients.

use std::sync::Arc;

use travel_sync_core::Config;
use travel_sync_core::constants::{SCHEMA_READY_RETRY_INTERVAL, SCHEMA_TIMEOUT};
use travel_sync_feeds::{GooglePlacesClient, OpenWeatherClient, TravelAdvisoryClient};
use travel_sync_storage::{GraphQlClient, GraphQlStore, GraphStore, Schema, SchemaError, StorageError, ready};

use crate::ServiceError;
use crate::loader::{Feeds, Loader};

/// Build the store client named by `config`.
///
/// # Errors
/// The HTTP client could not be built.
pub fn connect_store(config: &Config) -> Result<Arc<dyn GraphStore>, ServiceError> {
    let store = GraphQlStore::new(&config.store).map_err(ServiceError::store("connecting store"))?;
    Ok(Arc::new(store))
}

/// Build the three feed clients named by `config`.
///
/// # Errors
/// An HTTP client could not be built.
pub fn connect_feeds(config: &Config) -> Result<Feeds, ServiceError> {
    let places = GooglePlacesClient::new(config.keys.maps.clone(), &config.urls.places)
        .map_err(ServiceError::feed("building places client"))?;
    let weather = OpenWeatherClient::new(config.keys.weather.clone(), &config.urls.weather)
        .map_err(ServiceError::feed("building weather client"))?;
    let advisory = TravelAdvisoryClient::new(&config.urls.advisory)
        .map_err(ServiceError::feed("building advisory client"))?;
    Ok(Feeds { places: Arc::new(places), weather: Arc::new(weather), advisory: Arc::new(advisory) })
}

impl Loader {
    /// A loader talking to the store and feeds named by `config`.
    ///
    /// # Errors
    /// A client could not be built.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        Ok(Self::new(connect_store(config)?, connect_feeds(config)?, config.loader.clone()))
    }
}

/// Wait for the store, then install the schema if it differs.
///
/// Returns `true` when an update was sent. The whole operation is bounded
/// by [`SCHEMA_TIMEOUT`].
///
/// # Errors
/// The store never became ready, a schema request failed, the installed
/// schema still differs after the update, or the deadline passed.
pub async fn update_schema(config: &Config) -> Result<bool, SchemaError> {
    let run = async {
        let probe = reqwest::Client::builder().build().map_err(StorageError::from)?;
        ready::validate(&probe, &config.store.url, SCHEMA_READY_RETRY_INTERVAL, SCHEMA_TIMEOUT).await?;
        let client = GraphQlClient::with_timeout(&config.store, SCHEMA_TIMEOUT)?;
        Schema::new(client, &config.urls.upload_feed).create().await
    };
    tokio::time::timeout(SCHEMA_TIMEOUT, run).await.map_err(|_| SchemaError::TimedOut(SCHEMA_TIMEOUT))?
}
