use anyhow::Result;
use travel_sync_core::Config;

pub(crate) async fn run(config: &Config) -> Result<()> {
    tracing::info!(store = %config.store.url, "updating schema");
    if travel_sync_service::update_schema(config).await? {
        println!("schema updated");
    } else {
        println!("schema already current");
    }
    Ok(())
}
