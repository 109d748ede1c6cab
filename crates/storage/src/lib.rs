//! Storage layer for travel-sync
//!
//! Access to the graph store through its GraphQL endpoint, an in-memory
//! store with the same relation semantics, the readiness probe and schema
//! management.

mod documents;
pub mod error;
mod graph_store;
pub mod graphql;
mod memory;
pub mod ready;
pub mod schema;
pub mod traits;


pub use error::{ReadinessError, SchemaError, StorageError};
pub use graph_store::GraphQlStore;
pub use graphql::{Endpoint, GraphQlClient};
pub use memory::MemoryStore;
pub use schema::Schema;
pub use traits::GraphStore;
