use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use std::time::Duration;

use travel_sync_storage::ready;

use crate::AppState;
use crate::response_types::ReadinessResponse;

const READINESS_DEADLINE: Duration = Duration::from_secs(1);
const READINESS_RETRY: Duration = Duration::from_millis(100);

pub async fn health() -> &'static str {
    "ok"
}

/// Give the store a second to report healthy.
pub async fn readiness(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ReadinessResponse>) {
    let version = state.version.clone();
    match ready::validate(&state.probe, &state.store_url, READINESS_RETRY, READINESS_DEADLINE).await {
        Ok(()) => (StatusCode::OK, Json(ReadinessResponse { version, status: "ok".to_owned() })),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ReadinessResponse { version, status: "db not ready".to_owned() }),
            )
        },
    }
}
