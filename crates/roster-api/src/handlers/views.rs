//! View handlers
//!
//! Read-only roster, ranking, weekly and progress views.

use axum::{extract::State, Json};
use roster_service::{
    DayQuery, DuelService, ProgressResponse, ProgressService, RangeQuery, RankingResponse,
    RosterResponse, ViewQuery, ViewService, WeeklyDuelResponse,
};

use crate::extractors::QueryParams;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /views/roster?date=&filter=&search=
pub async fn roster(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ViewQuery>,
) -> ApiResult<Json<RosterResponse>> {
    let (date, filter) = (query.date()?, query.filter()?);
    let service = ViewService::new(state.service_context());
    Ok(Json(service.roster(date, filter, query.search()).await))
}

/// GET /views/power?date=&filter=&search=
pub async fn power_ranking(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ViewQuery>,
) -> ApiResult<Json<RankingResponse>> {
    let (date, filter) = (query.date()?, query.filter()?);
    let service = ViewService::new(state.service_context());
    Ok(Json(service.power_ranking(date, filter, query.search()).await))
}

/// GET /views/duel?date=&filter=&search=
pub async fn duel_ranking(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ViewQuery>,
) -> ApiResult<Json<RankingResponse>> {
    let (date, filter) = (query.date()?, query.filter()?);
    let service = ViewService::new(state.service_context());
    Ok(Json(service.duel_ranking(date, filter, query.search()).await))
}

/// GET /views/duel/weekly?date=
pub async fn weekly_duel(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<DayQuery>,
) -> ApiResult<Json<WeeklyDuelResponse>> {
    let anchor = query.date()?;
    let service = DuelService::new(state.service_context());
    Ok(Json(service.weekly(anchor).await))
}

/// GET /views/progress/power?start=&end=
pub async fn power_progress(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RangeQuery>,
) -> ApiResult<Json<ProgressResponse>> {
    let (start, end) = query.bounds()?;
    let service = ProgressService::new(state.service_context());
    Ok(Json(service.power(start, end).await?))
}

/// GET /views/progress/duel?start=&end=
pub async fn duel_progress(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RangeQuery>,
) -> ApiResult<Json<ProgressResponse>> {
    let (start, end) = query.bounds()?;
    let service = ProgressService::new(state.service_context());
    Ok(Json(service.duel(start, end).await?))
}
