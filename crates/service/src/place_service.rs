use std::sync::Arc;

use travel_sync_core::{Place, PlaceKey, Stored, Upserted};
use travel_sync_storage::GraphStore;

use crate::ServiceError;
use crate::locks::KeyedLocks;

/// Get-or-create for places, keyed by external place id within a city.
pub struct PlaceService {
    store: Arc<dyn GraphStore>,
    locks: KeyedLocks,
}

impl PlaceService {
    #[must_use]
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store, locks: KeyedLocks::new() }
    }

    /// Return the city's place with the same external id, or add `place`
    /// and append it to the city's place set.
    pub async fn upsert(
        &self,
        city_id: &str,
        mut place: Place,
    ) -> Result<Upserted<Stored<Place>>, ServiceError> {
        if city_id.is_empty() {
            return Err(ServiceError::InvalidInput("place has no city".to_owned()));
        }
        if place.external_id.trim().is_empty() {
            return Err(ServiceError::InvalidInput(format!("place {:?} has no external id", place.name)));
        }
        city_id.clone_into(&mut place.city_id);

        let key = PlaceKey::of(&place);
        let _guard = self.locks.lock(&key.to_string()).await;

        if let Some(existing) =
            self.store.place_by_key(&key).await.map_err(ServiceError::store("querying place"))?
        {
            return Ok(Upserted::Existing(existing));
        }

        let id = self.store.add_place(&place).await.map_err(ServiceError::store("adding place"))?;
        self.store.link_place(city_id, &id).await.map_err(ServiceError::store("linking place"))?;
        Ok(Upserted::Created(Stored::new(id, place)))
    }

    pub async fn list_for_city(&self, city_id: &str) -> Result<Vec<Stored<Place>>, ServiceError> {
        self.store.places_by_city(city_id).await.map_err(ServiceError::store("querying places"))
    }
}

#[cfg(test)]
mod tests {
    use travel_sync_core::City;
    use travel_sync_storage::MemoryStore;

    use super::*;
    use crate::test_support::FailingStore;

    fn place(external_id: &str) -> Place {
        Place { external_id: external_id.to_owned(), name: "Cafe".to_owned(), ..Place::default() }
    }

    #[tokio::test]
    async fn test_upsert_adds_then_reports_existing() {
        let store = Arc::new(MemoryStore::new());
        let city = store.add_city(&City::new("sydney", 0.0, 0.0)).await.unwrap();
        let service = PlaceService::new(store.clone());

        let first = service.upsert(&city, place("ext-1")).await.unwrap();
        let second = service.upsert(&city, place("ext-1")).await.unwrap();

        assert!(!first.is_existing());
        assert!(second.is_existing());
        assert_eq!(first.get().id, second.get().id);
        assert_eq!(first.get().city_id, city);
        assert_eq!(service.list_for_city(&city).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_retry_after_failed_link_finds_added_place() {
        let store = Arc::new(FailingStore::default());
        let city = store.add_city(&City::new("sydney", 0.0, 0.0)).await.unwrap();
        let service = PlaceService::new(store.clone());

        store.fail_once("link_place");
        assert!(service.upsert(&city, place("ext-1")).await.is_err());

        let retried = service.upsert(&city, place("ext-1")).await.unwrap();
        assert!(retried.is_existing());
        assert_eq!(store.inner.place_count().await, 1);
        assert_eq!(service.list_for_city(&city).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_external_id_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let city = store.add_city(&City::new("sydney", 0.0, 0.0)).await.unwrap();
        let service = PlaceService::new(store);

        let err = service.upsert(&city, place("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_link_to_unknown_city_fails() {
        let service = PlaceService::new(Arc::new(MemoryStore::new()));
        let err = service.upsert("0x404", place("ext-1")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
