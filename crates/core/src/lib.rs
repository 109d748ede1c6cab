//! Core domain types for travel-sync
//!
//! Entities persisted in the graph store, the search request that drives a
//! synchronization run, and shared configuration.

pub mod config;
pub mod constants;
pub mod env_config;

mod advisory;
mod city;
mod error;
mod place;
mod record;
mod search;
mod weather;

pub use advisory::*;
pub use city::*;
pub use config::Config;
pub use error::*;
pub use place::*;
pub use record::*;
pub use search::*;
pub use weather::*;
