use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use std::sync::Arc;

use travel_sync_core::Search;
use travel_sync_service::JobRecord;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::UploadFeedRequest;
use crate::response_types::UploadFeedResponse;

/// Validate the search, start a background load and acknowledge immediately.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    body: Result<Json<UploadFeedRequest>, JsonRejection>,
) -> Result<Json<UploadFeedResponse>, ApiError> {
    let Json(request) = body?;
    let search = Search::from(request);
    search.validate()?;

    let trace_id = state.jobs.submit(search.clone()).await;
    tracing::info!(%trace_id, city = %search.city_name, country = %search.country_code, "upload accepted");
    Ok(Json(UploadFeedResponse::accepted(search, trace_id)))
}

pub async fn job_status(
    State(state): State<Arc<AppState>>,
    Path(trace_id): Path<String>,
) -> Result<Json<JobRecord>, ApiError> {
    state
        .jobs
        .status(&trace_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("job '{trace_id}' not found")))
}
