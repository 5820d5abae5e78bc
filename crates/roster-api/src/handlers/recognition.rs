//! Name recognition handler

use axum::{extract::State, Json};
use roster_service::{RecognitionService, RecognizeNameRequest, RecognizeNameResponse};

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Best-effort name from a screenshot; `name` is null when nothing was read
///
/// POST /recognize-name
pub async fn recognize_name(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecognizeNameRequest>,
) -> ApiResult<Json<RecognizeNameResponse>> {
    let service = RecognitionService::new(state.service_context());
    Ok(Json(service.recognize(&request.image).await))
}
