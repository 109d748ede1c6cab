//! [`GraphStore`] backed by the store's GraphQL endpoint.

use async_trait::async_trait;
use serde_json::json;
use travel_sync_core::config::StoreConfig;
use travel_sync_core::{Advisory, City, Place, PlaceKey, Stored, Weather};

use crate::documents::{self as doc, Added, Deleted, GetCity, Resp, Updated};
use crate::error::StorageError;
use crate::graphql::{Endpoint, GraphQlClient};
use crate::traits::GraphStore;

/// Graph store reached over GraphQL.
#[derive(Debug)]
pub struct GraphQlStore {
    client: GraphQlClient,
}

impl GraphQlStore {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StoreConfig) -> Result<Self, StorageError> {
        Ok(Self { client: GraphQlClient::new(config)? })
    }

    #[must_use]
    pub const fn from_client(client: GraphQlClient) -> Self {
        Self { client }
    }

    async fn add<T: serde::Serialize + Sync>(
        &self,
        document: &str,
        entity: &'static str,
        input: &T,
    ) -> Result<String, StorageError> {
        let result: Resp<Added> =
            self.client.execute(Endpoint::GraphQl, document, json!({ "input": [input] })).await?;
        let mut entities = result.resp.map(|r| r.entities).unwrap_or_default();
        match (entities.pop(), entities.is_empty()) {
            (Some(added), true) => Ok(added.id),
            _ => Err(StorageError::Operation(format!("{entity} id not returned"))),
        }
    }

    async fn delete(&self, document: &str, id: &str) -> Result<u64, StorageError> {
        let result: Resp<Deleted> =
            self.client.execute(Endpoint::GraphQl, document, json!({ "id": id })).await?;
        let deleted = result.resp.map_or(0, |r| {
            tracing::debug!(id, msg = %r.msg, num_uids = r.num_uids, "delete");
            r.num_uids
        });
        Ok(deleted)
    }

    async fn link(&self, document: &str, city_id: &str, id: &str) -> Result<(), StorageError> {
        let result: Resp<Updated> = self
            .client
            .execute(Endpoint::GraphQl, document, json!({ "city": city_id, "id": id }))
            .await?;
        match result.resp {
            Some(updated) if updated.num_uids > 0 => Ok(()),
            _ => Err(StorageError::NotFound { entity: "city", key: city_id.to_owned() }),
        }
    }
}

#[async_trait]
impl GraphStore for GraphQlStore {
    async fn city_by_name(&self, name: &str) -> Result<Option<Stored<City>>, StorageError> {
        let result: doc::QueryCity =
            self.client.execute(Endpoint::GraphQl, doc::CITY_BY_NAME, json!({ "name": name })).await?;
        Ok(result.cities.into_iter().next())
    }

    async fn city_by_id(&self, id: &str) -> Result<Option<Stored<City>>, StorageError> {
        let result: GetCity<Stored<City>> =
            self.client.execute(Endpoint::GraphQl, doc::CITY_BY_ID, json!({ "id": id })).await?;
        Ok(result.city)
    }

    async fn add_city(&self, city: &City) -> Result<String, StorageError> {
        self.add(doc::ADD_CITY, "city", city).await
    }

    async fn place_by_key(&self, key: &PlaceKey) -> Result<Option<Stored<Place>>, StorageError> {
        let result: GetCity<doc::CityPlaces> = self
            .client
            .execute(
                Endpoint::GraphQl,
                doc::PLACE_BY_KEY,
                json!({ "city": key.city_id, "place_id": key.external_id }),
            )
            .await?;
        Ok(result.city.and_then(|c| c.places).and_then(|places| places.into_iter().next()))
    }

    async fn places_by_city(&self, city_id: &str) -> Result<Vec<Stored<Place>>, StorageError> {
        let result: GetCity<doc::CityPlaces> = self
            .client
            .execute(Endpoint::GraphQl, doc::PLACES_BY_CITY, json!({ "city": city_id }))
            .await?;
        Ok(result.city.and_then(|c| c.places).unwrap_or_default())
    }

    async fn add_place(&self, place: &Place) -> Result<String, StorageError> {
        self.add(doc::ADD_PLACE, "place", place).await
    }

    async fn link_place(&self, city_id: &str, place_id: &str) -> Result<(), StorageError> {
        self.link(doc::LINK_PLACE, city_id, place_id).await
    }

    async fn weather_for_city(&self, city_id: &str) -> Result<Option<Stored<Weather>>, StorageError> {
        let result: GetCity<doc::CityWeather> = self
            .client
            .execute(Endpoint::GraphQl, doc::WEATHER_FOR_CITY, json!({ "city": city_id }))
            .await?;
        Ok(result.city.and_then(|c| c.weather))
    }

    async fn weathers_referencing(&self, city_id: &str) -> Result<Vec<Stored<Weather>>, StorageError> {
        let result: doc::QueryWeather = self
            .client
            .execute(Endpoint::GraphQl, doc::WEATHERS_REFERENCING, json!({ "city": city_id }))
            .await?;
        Ok(result.weathers.unwrap_or_default())
    }

    async fn add_weather(&self, weather: &Weather) -> Result<String, StorageError> {
        self.add(doc::ADD_WEATHER, "weather", weather).await
    }

    async fn delete_weather(&self, id: &str) -> Result<u64, StorageError> {
        self.delete(doc::DELETE_WEATHER, id).await
    }

    async fn link_weather(&self, city_id: &str, weather_id: &str) -> Result<(), StorageError> {
        self.link(doc::LINK_WEATHER, city_id, weather_id).await
    }

    async fn advisory_for_city(&self, city_id: &str) -> Result<Option<Stored<Advisory>>, StorageError> {
        let result: GetCity<doc::CityAdvisory> = self
            .client
            .execute(Endpoint::GraphQl, doc::ADVISORY_FOR_CITY, json!({ "city": city_id }))
            .await?;
        Ok(result.city.and_then(|c| c.advisory))
    }

    async fn advisories_referencing(&self, city_id: &str) -> Result<Vec<Stored<Advisory>>, StorageError> {
        let result: doc::QueryAdvisory = self
            .client
            .execute(Endpoint::GraphQl, doc::ADVISORIES_REFERENCING, json!({ "city": city_id }))
            .await?;
        Ok(result.advisories.unwrap_or_default())
    }

    async fn add_advisory(&self, advisory: &Advisory) -> Result<String, StorageError> {
        self.add(doc::ADD_ADVISORY, "advisory", advisory).await
    }

    async fn delete_advisory(&self, id: &str) -> Result<u64, StorageError> {
        self.delete(doc::DELETE_ADVISORY, id).await
    }

    async fn link_advisory(&self, city_id: &str, advisory_id: &str) -> Result<(), StorageError> {
        self.link(doc::LINK_ADVISORY, city_id, advisory_id).await
    }
}
