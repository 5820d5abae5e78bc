//! Snapshot handlers
//!
//! Endpoints for single snapshots and selection-based bulk edits.

use axum::{extract::State, Json};
use roster_service::{
    AffectedResponse, BulkService, BulkUpdateRequest, CopySelectionRequest, DayQuery,
    SaveSnapshotRequest, SnapshotResponse, SnapshotService,
};

use crate::extractors::{IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List one day's snapshots
///
/// GET /snapshots?date=
pub async fn list_snapshots(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DayQuery>,
) -> ApiResult<Json<Vec<SnapshotResponse>>> {
    let date = query.date()?;
    let service = SnapshotService::new(state.service_context());
    Ok(Json(service.list_day(date).await))
}

/// GET /snapshots/:id
pub async fn get_snapshot(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<SnapshotResponse>> {
    let service = SnapshotService::new(state.service_context());
    Ok(Json(service.get(&id).await?))
}

/// POST /snapshots
pub async fn create_snapshot(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveSnapshotRequest>,
) -> ApiResult<Created<Json<SnapshotResponse>>> {
    let service = SnapshotService::new(state.service_context());
    let response = service.create(request).await?;
    Ok(Created(Json(response)))
}

/// PUT /snapshots/:id
pub async fn update_snapshot(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<SaveSnapshotRequest>,
) -> ApiResult<Json<SnapshotResponse>> {
    let service = SnapshotService::new(state.service_context());
    Ok(Json(service.update(&id, request).await?))
}

/// DELETE /snapshots/:id
pub async fn delete_snapshot(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<NoContent> {
    let service = SnapshotService::new(state.service_context());
    service.delete(&id).await?;
    Ok(NoContent)
}

/// Copy selected snapshots to a date, keeping duel scores
///
/// POST /snapshots/copy
pub async fn copy_selection(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CopySelectionRequest>,
) -> ApiResult<Json<AffectedResponse>> {
    let service = BulkService::new(state.service_context());
    Ok(Json(service.copy_selection(request).await?))
}

/// PATCH /snapshots/bulk
pub async fn bulk_update(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkUpdateRequest>,
) -> ApiResult<Json<AffectedResponse>> {
    let service = BulkService::new(state.service_context());
    Ok(Json(service.bulk_update(request).await?))
}
