use anyhow::Result;
use std::sync::Arc;
use travel_sync_core::Config;
use travel_sync_http::{AppState, create_router};

pub(crate) async fn run(config: &Config, port: u16, host: String) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!(store = %config.store.url, categories = ?config.loader.categories, "loader configured");

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
