use std::sync::Arc;

use travel_sync_core::{City, Stored, Upserted};
use travel_sync_storage::GraphStore;

use crate::ServiceError;
use crate::locks::KeyedLocks;

/// Get-or-create for cities, keyed by name.
pub struct CityService {
    store: Arc<dyn GraphStore>,
    locks: KeyedLocks,
}

impl CityService {
    #[must_use]
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store, locks: KeyedLocks::new() }
    }

    /// Return the city stored under `city.name`, creating it if absent.
    ///
    /// Lookup and insert for the same name are serialized within this process.
    pub async fn upsert(&self, city: City) -> Result<Upserted<Stored<City>>, ServiceError> {
        if city.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("city name is empty".to_owned()));
        }
        let _guard = self.locks.lock(&city.name).await;

        if let Some(existing) =
            self.store.city_by_name(&city.name).await.map_err(ServiceError::store("querying city"))?
        {
            tracing::debug!(city = %existing.name, id = %existing.id, "city exists");
            return Ok(Upserted::Existing(existing));
        }

        let id = self.store.add_city(&city).await.map_err(ServiceError::store("adding city"))?;
        tracing::debug!(city = %city.name, %id, "city added");
        Ok(Upserted::Created(Stored::new(id, city)))
    }

    pub async fn get(&self, id: &str) -> Result<Option<Stored<City>>, ServiceError> {
        self.store.city_by_id(id).await.map_err(ServiceError::store("querying city"))
    }
}

#[cfg(test)]
mod tests {
    use travel_sync_storage::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let service = CityService::new(store.clone());
        let sydney = City::new("sydney", -33.865143, 151.2099);

        let first = service.upsert(sydney.clone()).await.unwrap();
        let second = service.upsert(sydney).await.unwrap();

        assert!(!first.is_existing());
        assert!(second.is_existing());
        assert_eq!(first.get().id, second.get().id);
        assert_eq!(store.count_cities_named("sydney").await, 1);

        let fetched = service.get(&first.get().id).await.unwrap().unwrap();
        assert_eq!(fetched.lat, -33.865143);
        assert!(service.get("0x404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_upserts_create_one_city() {
        let store = Arc::new(MemoryStore::new());
        let service = Arc::new(CityService::new(store.clone()));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.upsert(City::new("miami", 25.7617, -80.1918)).await })
            })
            .collect();
        let mut created = 0;
        for task in tasks {
            if !task.await.unwrap().unwrap().is_existing() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.count_cities_named("miami").await, 1);
    }

    #[tokio::test]
    async fn test_blank_name_is_invalid() {
        let service = CityService::new(Arc::new(MemoryStore::new()));
        let err = service.upsert(City::new(" ", 0.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
