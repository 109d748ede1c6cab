//! Replacement of a city's singleton relations (weather, advisory).
//!
//! The store has no transactions, so a replace is a sequence of independent
//! calls driven as a state machine:
//!
//! ```text
//! Absent -> Deleting(old) -> Adding -> Linking(new) -> Done(new)
//!        \______________/
//!         nothing to delete
//! ```
//!
//! `Absent` inspects the city: the entity its relation points at plus any
//! entity whose back-reference names the city without being linked. Those
//! are leftovers of an interrupted replace and are deleted with the current
//! one, so rerunning a failed replace converges to exactly one linked entity.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use travel_sync_core::{Advisory, Stored, Weather};
use travel_sync_storage::{GraphStore, StorageError};

/// Position of a replace in its state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceState {
    /// Nothing known about existing entities yet.
    Absent,
    /// Deleting the current entity and leftovers, by id.
    Deleting(Vec<String>),
    Adding,
    /// The new entity exists but the city does not point at it yet.
    Linking(String),
    Done(String),
}

impl fmt::Display for ReplaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("inspecting"),
            Self::Deleting(ids) => write!(f, "deleting [{}]", ids.join(", ")),
            Self::Adding => f.write_str("adding"),
            Self::Linking(id) => write!(f, "linking {id}"),
            Self::Done(id) => write!(f, "done {id}"),
        }
    }
}

/// A replace failed in `state`. Rerunning the replace resumes from the store's actual contents.
#[derive(Debug, Error)]
#[error("replacing {relation} failed while {state}: {source}")]
pub struct ReplaceError {
    pub relation: &'static str,
    pub state: ReplaceState,
    #[source]
    pub source: StorageError,
}

/// Store primitives for one singleton relation of a city.
#[async_trait]
pub trait SingletonRelation: Send + Sync {
    type Entity: Clone + Send + Sync;

    const NAME: &'static str;

    fn bind(entity: &mut Self::Entity, city_id: &str);

    async fn current(
        &self,
        store: &dyn GraphStore,
        city_id: &str,
    ) -> Result<Option<Stored<Self::Entity>>, StorageError>;

    async fn referencing(
        &self,
        store: &dyn GraphStore,
        city_id: &str,
    ) -> Result<Vec<Stored<Self::Entity>>, StorageError>;

    async fn add(&self, store: &dyn GraphStore, entity: &Self::Entity) -> Result<String, StorageError>;

    async fn delete(&self, store: &dyn GraphStore, id: &str) -> Result<u64, StorageError>;

    async fn link(&self, store: &dyn GraphStore, city_id: &str, id: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherRelation;

#[async_trait]
impl SingletonRelation for WeatherRelation {
    type Entity = Weather;

    const NAME: &'static str = "weather";

    fn bind(entity: &mut Weather, city_id: &str) {
        city_id.clone_into(&mut entity.city_id);
    }

    async fn current(&self, store: &dyn GraphStore, city_id: &str) -> Result<Option<Stored<Weather>>, StorageError> {
        store.weather_for_city(city_id).await
    }

    async fn referencing(&self, store: &dyn GraphStore, city_id: &str) -> Result<Vec<Stored<Weather>>, StorageError> {
        store.weathers_referencing(city_id).await
    }

    async fn add(&self, store: &dyn GraphStore, entity: &Weather) -> Result<String, StorageError> {
        store.add_weather(entity).await
    }

    async fn delete(&self, store: &dyn GraphStore, id: &str) -> Result<u64, StorageError> {
        store.delete_weather(id).await
    }

    async fn link(&self, store: &dyn GraphStore, city_id: &str, id: &str) -> Result<(), StorageError> {
        store.link_weather(city_id, id).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdvisoryRelation;

#[async_trait]
impl SingletonRelation for AdvisoryRelation {
    type Entity = Advisory;

    const NAME: &'static str = "advisory";

    fn bind(entity: &mut Advisory, city_id: &str) {
        city_id.clone_into(&mut entity.city_id);
    }

    async fn current(&self, store: &dyn GraphStore, city_id: &str) -> Result<Option<Stored<Advisory>>, StorageError> {
        store.advisory_for_city(city_id).await
    }

    async fn referencing(&self, store: &dyn GraphStore, city_id: &str) -> Result<Vec<Stored<Advisory>>, StorageError> {
        store.advisories_referencing(city_id).await
    }

    async fn add(&self, store: &dyn GraphStore, entity: &Advisory) -> Result<String, StorageError> {
        store.add_advisory(entity).await
    }

    async fn delete(&self, store: &dyn GraphStore, id: &str) -> Result<u64, StorageError> {
        store.delete_advisory(id).await
    }

    async fn link(&self, store: &dyn GraphStore, city_id: &str, id: &str) -> Result<(), StorageError> {
        store.link_advisory(city_id, id).await
    }
}

/// Drives replaces of one relation kind.
pub struct Replacer<R> {
    store: Arc<dyn GraphStore>,
    relation: R,
}

impl<R: SingletonRelation> Replacer<R> {
    #[must_use]
    pub fn new(store: Arc<dyn GraphStore>, relation: R) -> Self {
        Self { store, relation }
    }

    /// Make `entity` the city's only live entity of this kind and link it.
    pub async fn replace(
        &self,
        city_id: &str,
        mut entity: R::Entity,
    ) -> Result<Stored<R::Entity>, ReplaceError> {
        R::bind(&mut entity, city_id);
        let store = self.store.as_ref();
        let mut state = ReplaceState::Absent;

        loop {
            let fail = |state: &ReplaceState| {
                let state = state.clone();
                move |source| ReplaceError { relation: R::NAME, state, source }
            };
            state = match state {
                ReplaceState::Absent => {
                    let stale = self.stale_ids(city_id).await.map_err(fail(&state))?;
                    if stale.is_empty() { ReplaceState::Adding } else { ReplaceState::Deleting(stale) }
                },
                ReplaceState::Deleting(ref ids) => {
                    for id in ids {
                        match self.relation.delete(store, id).await {
                            Ok(0) => tracing::debug!(relation = R::NAME, %id, "already deleted"),
                            Ok(_) => tracing::debug!(relation = R::NAME, %id, "deleted"),
                            Err(e) if e.is_not_found() => {
                                tracing::debug!(relation = R::NAME, %id, "already deleted");
                            },
                            Err(e) => return Err(fail(&state)(e)),
                        }
                    }
                    ReplaceState::Adding
                },
                ReplaceState::Adding => {
                    let id = self.relation.add(store, &entity).await.map_err(fail(&state))?;
                    ReplaceState::Linking(id)
                },
                ReplaceState::Linking(id) => {
                    if let Err(e) = self.relation.link(store, city_id, &id).await {
                        return Err(fail(&ReplaceState::Linking(id))(e));
                    }
                    ReplaceState::Done(id)
                },
                ReplaceState::Done(id) => {
                    tracing::debug!(relation = R::NAME, city_id, %id, "replaced");
                    return Ok(Stored::new(id, entity));
                },
            };
        }
    }

    async fn stale_ids(&self, city_id: &str) -> Result<Vec<String>, StorageError> {
        let store = self.store.as_ref();
        let mut ids = BTreeSet::new();
        if let Some(current) = self.relation.current(store, city_id).await? {
            ids.insert(current.id);
        }
        for leftover in self.relation.referencing(store, city_id).await? {
            if ids.insert(leftover.id.clone()) {
                tracing::info!(relation = R::NAME, city_id, id = %leftover.id, "found unlinked leftover");
            }
        }
        Ok(ids.into_iter().collect())
    }
}
