//! Alliance config handlers

use axum::{extract::State, Json};
use roster_service::{ConfigResponse, ConfigService, SetLogoRequest, UpdateConfigRequest};

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /config
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigService::new(state.service_context()).get().await)
}

/// PATCH /config
pub async fn update_config(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateConfigRequest>,
) -> ApiResult<Json<ConfigResponse>> {
    let service = ConfigService::new(state.service_context());
    Ok(Json(service.update(request).await?))
}

/// PUT /config/logo
pub async fn set_logo(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SetLogoRequest>,
) -> ApiResult<Json<ConfigResponse>> {
    let service = ConfigService::new(state.service_context());
    Ok(Json(service.set_logo(request).await?))
}
