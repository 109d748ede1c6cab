//! Identity wrappers shared by every entity kind.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// An entity the store has assigned an id to.
///
/// The entity fields are flattened so a store payload such as
/// `{"id": "0x2a", "name": "sydney", ...}` decodes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub entity: T,
}

impl<T> Stored<T> {
    #[must_use]
    pub fn new(id: impl Into<String>, entity: T) -> Self {
        Self { id: id.into(), entity }
    }
}

impl<T> Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

/// Outcome of a get-or-create operation.
///
/// `Existing` is the "already exists" signal: the store held a matching
/// record and nothing was written.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted<T> {
    Created(T),
    Existing(T),
}

impl<T> Upserted<T> {
    #[must_use]
    pub const fn is_existing(&self) -> bool {
        matches!(self, Self::Existing(_))
    }

    #[must_use]
    pub const fn get(&self) -> &T {
        match self {
            Self::Created(v) | Self::Existing(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(v) | Self::Existing(v) => v,
        }
    }
}

/// Decodes `null` as the type's default. The store returns `null` for
/// optional fields that were never set.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serializes a city id as the `{"id": ...}` reference object the graph
/// schema uses for back-references.
pub mod city_ref {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Ref {
        #[serde(default)]
        id: String,
    }

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        Ref { id: id.to_owned() }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let r: Option<Ref> = Option::deserialize(deserializer)?;
        Ok(r.map(|r| r.id).unwrap_or_default())
    }
}
