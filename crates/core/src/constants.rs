//! Shared constants for travel-sync.

use std::time::Duration;

/// Deadline for a store point lookup or mutation.
pub const STORE_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for schema operations (readiness wait included).
pub const SCHEMA_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry interval used while waiting for the store before schema operations.
pub const SCHEMA_READY_RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// Deadline for one full city synchronization run.
pub const LOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Upper bound on a single health probe.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Delay before requesting any page after the first one of a places search.
pub const PLACES_PAGE_DELAY: Duration = Duration::from_secs(3);

/// Delay before retrying a page the places API rejected as premature.
pub const PLACES_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Attempts per page before a places search gives up.
pub const PLACES_MAX_ATTEMPTS: u32 = 3;

/// Default place categories searched for each city.
pub const DEFAULT_CATEGORIES: &[&str] = &["restaurant", "bar", "supermarket"];

/// Default search radius in meters.
pub const DEFAULT_RADIUS: u32 = 5000;

/// Cities loaded by the `seed` command: (country code, name, lat, lng).
pub const SEED_CITIES: &[(&str, &str, f64, f64)] = &[
    ("US", "miami", 25.7617, -80.1918),
    ("US", "new york", 40.730_610, -73.935_242),
    ("AU", "sydney", -33.865_143, 151.209_900),
];
