use anyhow::{Context, Result};
use travel_sync_core::constants::SEED_CITIES;
use travel_sync_core::{Config, Search};
use travel_sync_service::Loader;
use uuid::Uuid;

/// Run one load to completion and print its report.
pub(crate) async fn run(config: &Config, search: Search) -> Result<()> {
    let loader = Loader::from_config(config)?;
    let trace_id = Uuid::new_v4().to_string();
    let report = loader
        .update_data(&trace_id, &search)
        .await
        .with_context(|| format!("loading {}", search.city_name))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Load every built-in city in turn. A failed city is logged and the rest still run.
pub(crate) async fn seed(config: &Config) -> Result<()> {
    let loader = Loader::from_config(config)?;
    let mut failed = 0_usize;
    for &(country, city, lat, lng) in SEED_CITIES {
        let trace_id = Uuid::new_v4().to_string();
        match loader.update_data(&trace_id, &Search::new(city, country, lat, lng)).await {
            Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
            Err(e) => {
                tracing::error!(%trace_id, city, error = %e, "seed load failed");
                failed += 1;
            },
        }
    }
    anyhow::ensure!(failed == 0, "{failed} of {} seed cities failed", SEED_CITIES.len());
    Ok(())
}
