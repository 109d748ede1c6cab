//! In-memory [`GraphStore`] implementation for tests and dry runs.
//!
//! Mirrors the graph store's relation semantics: a city's weather and
//! advisory are single pointers, places are an appendable set, and every
//! child keeps its own back-reference to the city. A place added with a
//! city reference joins that city's set immediately, as the schema's
//! `@hasInverse` edge does.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use travel_sync_core::{Advisory, City, Place, PlaceKey, Stored, Weather};

use crate::error::StorageError;
use crate::traits::GraphStore;

#[derive(Default)]
struct CityNode {
    city: City,
    places: Vec<String>,
    weather: Option<String>,
    advisory: Option<String>,
}

#[derive(Default)]
struct Graph {
    next_id: u64,
    cities: HashMap<String, CityNode>,
    places: HashMap<String, Place>,
    weathers: HashMap<String, Weather>,
    advisories: HashMap<String, Advisory>,
}

impl Graph {
    fn allocate_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:#x}", self.next_id)
    }

    fn city_mut(&mut self, id: &str) -> Result<&mut CityNode, StorageError> {
        self.cities
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound { entity: "city", key: id.to_owned() })
    }
}

/// In-memory graph store.
#[derive(Default)]
pub struct MemoryStore {
    graph: RwLock<Graph>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cities stored under `name`.
    pub async fn count_cities_named(&self, name: &str) -> usize {
        self.graph.read().await.cities.values().filter(|n| n.city.name == name).count()
    }

    /// Number of live weather entities, linked or not.
    pub async fn weather_count(&self) -> usize {
        self.graph.read().await.weathers.len()
    }

    /// Number of place entities, across all cities.
    pub async fn place_count(&self) -> usize {
        self.graph.read().await.places.len()
    }

    /// Number of live advisory entities, linked or not.
    pub async fn advisory_count(&self) -> usize {
        self.graph.read().await.advisories.len()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn city_by_name(&self, name: &str) -> Result<Option<Stored<City>>, StorageError> {
        let graph = self.graph.read().await;
        Ok(graph
            .cities
            .iter()
            .find(|(_, node)| node.city.name == name)
            .map(|(id, node)| Stored::new(id.clone(), node.city.clone())))
    }

    async fn city_by_id(&self, id: &str) -> Result<Option<Stored<City>>, StorageError> {
        let graph = self.graph.read().await;
        Ok(graph.cities.get(id).map(|node| Stored::new(id, node.city.clone())))
    }

    async fn add_city(&self, city: &City) -> Result<String, StorageError> {
        let mut graph = self.graph.write().await;
        let id = graph.allocate_id();
        graph.cities.insert(id.clone(), CityNode { city: city.clone(), ..CityNode::default() });
        Ok(id)
    }

    async fn place_by_key(&self, key: &PlaceKey) -> Result<Option<Stored<Place>>, StorageError> {
        let graph = self.graph.read().await;
        let Some(node) = graph.cities.get(&key.city_id) else {
            return Ok(None);
        };
        Ok(node.places.iter().find_map(|id| {
            graph
                .places
                .get(id)
                .filter(|p| p.external_id == key.external_id)
                .map(|p| Stored::new(id.clone(), p.clone()))
        }))
    }

    async fn places_by_city(&self, city_id: &str) -> Result<Vec<Stored<Place>>, StorageError> {
        let graph = self.graph.read().await;
        let Some(node) = graph.cities.get(city_id) else {
            return Ok(Vec::new());
        };
        Ok(node
            .places
            .iter()
            .filter_map(|id| graph.places.get(id).map(|p| Stored::new(id.clone(), p.clone())))
            .collect())
    }

    async fn add_place(&self, place: &Place) -> Result<String, StorageError> {
        let mut graph = self.graph.write().await;
        let id = graph.allocate_id();
        if let Some(node) = graph.cities.get_mut(&place.city_id) {
            node.places.push(id.clone());
        }
        graph.places.insert(id.clone(), place.clone());
        Ok(id)
    }

    async fn link_place(&self, city_id: &str, place_id: &str) -> Result<(), StorageError> {
        let mut graph = self.graph.write().await;
        let node = graph.city_mut(city_id)?;
        if !node.places.iter().any(|id| id == place_id) {
            node.places.push(place_id.to_owned());
        }
        Ok(())
    }

    async fn weather_for_city(&self, city_id: &str) -> Result<Option<Stored<Weather>>, StorageError> {
        let graph = self.graph.read().await;
        Ok(graph
            .cities
            .get(city_id)
            .and_then(|node| node.weather.as_ref())
            .and_then(|id| graph.weathers.get(id).map(|w| Stored::new(id.clone(), w.clone()))))
    }

    async fn weathers_referencing(&self, city_id: &str) -> Result<Vec<Stored<Weather>>, StorageError> {
        let graph = self.graph.read().await;
        Ok(graph
            .weathers
            .iter()
            .filter(|(_, w)| w.city_id == city_id)
            .map(|(id, w)| Stored::new(id.clone(), w.clone()))
            .collect())
    }

    async fn add_weather(&self, weather: &Weather) -> Result<String, StorageError> {
        let mut graph = self.graph.write().await;
        let id = graph.allocate_id();
        graph.weathers.insert(id.clone(), weather.clone());
        Ok(id)
    }

    async fn delete_weather(&self, id: &str) -> Result<u64, StorageError> {
        let mut graph = self.graph.write().await;
        if graph.weathers.remove(id).is_none() {
            return Ok(0);
        }
        for node in graph.cities.values_mut() {
            if node.weather.as_deref() == Some(id) {
                node.weather = None;
            }
        }
        Ok(1)
    }

    async fn link_weather(&self, city_id: &str, weather_id: &str) -> Result<(), StorageError> {
        let mut graph = self.graph.write().await;
        graph.city_mut(city_id)?.weather = Some(weather_id.to_owned());
        Ok(())
    }

    async fn advisory_for_city(&self, city_id: &str) -> Result<Option<Stored<Advisory>>, StorageError> {
        let graph = self.graph.read().await;
        Ok(graph
            .cities
            .get(city_id)
            .and_then(|node| node.advisory.as_ref())
            .and_then(|id| graph.advisories.get(id).map(|a| Stored::new(id.clone(), a.clone()))))
    }

    async fn advisories_referencing(&self, city_id: &str) -> Result<Vec<Stored<Advisory>>, StorageError> {
        let graph = self.graph.read().await;
        Ok(graph
            .advisories
            .iter()
            .filter(|(_, a)| a.city_id == city_id)
            .map(|(id, a)| Stored::new(id.clone(), a.clone()))
            .collect())
    }

    async fn add_advisory(&self, advisory: &Advisory) -> Result<String, StorageError> {
        let mut graph = self.graph.write().await;
        let id = graph.allocate_id();
        graph.advisories.insert(id.clone(), advisory.clone());
        Ok(id)
    }

    async fn delete_advisory(&self, id: &str) -> Result<u64, StorageError> {
        let mut graph = self.graph.write().await;
        if graph.advisories.remove(id).is_none() {
            return Ok(0);
        }
        for node in graph.cities.values_mut() {
            if node.advisory.as_deref() == Some(id) {
                node.advisory = None;
            }
        }
        Ok(1)
    }

    async fn link_advisory(&self, city_id: &str, advisory_id: &str) -> Result<(), StorageError> {
        let mut graph = self.graph.write().await;
        graph.city_mut(city_id)?.advisory = Some(advisory_id.to_owned());
        Ok(())
    }
}
