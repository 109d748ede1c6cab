//! Service layer for travel-sync
//!
//! City and place upserts, singleton replacement for weather and advisory,
//! the synchronization loader and background job tracking.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::ref_patterns, reason = "Ref patterns are clearer in some contexts")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::let_underscore_untyped, reason = "Type is clear from context")]
#![allow(clippy::let_underscore_must_use, reason = "Intentionally ignoring results")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::cognitive_complexity, reason = "Complex async flows are inherent")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod city_service;
mod error;
mod jobs;
pub mod loader;
mod locks;
pub mod marshal;
mod place_service;
pub mod replace;
pub mod setup;

#[cfg(test)]
mod test_support;

mod jobs_tests;

pub use city_service::CityService;
pub use error::{ErrorKind, LoadError, ServiceError};
pub use jobs::{JobRecord, JobService, JobStatus, MAX_TRACKED_JOBS};
pub use loader::{CategoryReport, Feeds, LoadReport, LoadStage, LoadState, Loader};
pub use locks::{KeyGuard, KeyedLocks};
pub use place_service::PlaceService;
pub use replace::{AdvisoryRelation, ReplaceError, ReplaceState, Replacer, WeatherRelation};
pub use setup::update_schema;
