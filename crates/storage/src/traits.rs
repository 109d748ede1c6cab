//! Store trait abstraction
//!
//! Defines the async primitives the synchronization pipeline needs from the
//! graph store. Lookups return `Ok(None)` when nothing matches.

use async_trait::async_trait;
use travel_sync_core::{Advisory, City, Place, PlaceKey, Stored, Weather};

use crate::error::StorageError;

/// Query/mutation primitives over cities and the entities they own.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn city_by_name(&self, name: &str) -> Result<Option<Stored<City>>, StorageError>;

    async fn city_by_id(&self, id: &str) -> Result<Option<Stored<City>>, StorageError>;

    /// Add a city. Returns the generated id.
    async fn add_city(&self, city: &City) -> Result<String, StorageError>;

    async fn place_by_key(&self, key: &PlaceKey) -> Result<Option<Stored<Place>>, StorageError>;

    /// Places linked into the city's place set.
    async fn places_by_city(&self, city_id: &str) -> Result<Vec<Stored<Place>>, StorageError>;

    /// Add a place standalone. Returns the generated id.
    async fn add_place(&self, place: &Place) -> Result<String, StorageError>;

    /// Append a place to the city's place set.
    async fn link_place(&self, city_id: &str, place_id: &str) -> Result<(), StorageError>;

    /// The weather the city's relation points at.
    async fn weather_for_city(&self, city_id: &str) -> Result<Option<Stored<Weather>>, StorageError>;

    /// Every live weather whose back-reference names the city, linked or not.
    async fn weathers_referencing(&self, city_id: &str) -> Result<Vec<Stored<Weather>>, StorageError>;

    async fn add_weather(&self, weather: &Weather) -> Result<String, StorageError>;

    /// Delete by id. Returns the number of deleted entities.
    async fn delete_weather(&self, id: &str) -> Result<u64, StorageError>;

    /// Point the city's weather relation at `weather_id`.
    async fn link_weather(&self, city_id: &str, weather_id: &str) -> Result<(), StorageError>;

    async fn advisory_for_city(&self, city_id: &str) -> Result<Option<Stored<Advisory>>, StorageError>;

    async fn advisories_referencing(&self, city_id: &str) -> Result<Vec<Stored<Advisory>>, StorageError>;

    async fn add_advisory(&self, advisory: &Advisory) -> Result<String, StorageError>;

    async fn delete_advisory(&self, id: &str) -> Result<u64, StorageError>;

    async fn link_advisory(&self, city_id: &str, advisory_id: &str) -> Result<(), StorageError>;
}
