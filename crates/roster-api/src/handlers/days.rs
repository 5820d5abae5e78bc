//! Day handlers
//!
//! Whole-day stat tiles and maintenance operations.

use axum::{extract::State, Json};
use roster_service::{AffectedResponse, BulkService, StatsResponse, ViewService};

use crate::extractors::DatePath;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /days/:date/stats
pub async fn day_stats(State(state): State<AppState>, DatePath(date): DatePath) -> Json<StatsResponse> {
    let service = ViewService::new(state.service_context());
    Json(service.stats(date).await)
}

/// Copy the previous day forward with duel scores zeroed
///
/// POST /days/:date/copy-previous
pub async fn copy_previous_day(
    State(state): State<AppState>,
    DatePath(date): DatePath,
) -> ApiResult<Json<AffectedResponse>> {
    let service = BulkService::new(state.service_context());
    Ok(Json(service.copy_previous_day(date).await?))
}

/// POST /days/:date/reset-duel
pub async fn reset_duel(
    State(state): State<AppState>,
    DatePath(date): DatePath,
) -> ApiResult<Json<AffectedResponse>> {
    let service = BulkService::new(state.service_context());
    Ok(Json(service.reset_day(date).await?))
}

/// POST /days/:date/dedupe
pub async fn deduplicate(
    State(state): State<AppState>,
    DatePath(date): DatePath,
) -> ApiResult<Json<AffectedResponse>> {
    let service = BulkService::new(state.service_context());
    Ok(Json(service.deduplicate(date).await?))
}
