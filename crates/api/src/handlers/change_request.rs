//! Handlers for change requests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use echotasks_core::types::DbId;
use echotasks_db::models::change_request::{
    ChangeRequest, ChangeRequestWithContext, CreateChangeRequest,
};
use echotasks_db::repositories::ChangeRequestRepo;

use crate::error::AppResult;
use crate::lifecycle::changes;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// POST /api/v1/projects/{id}/changes
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateChangeRequest>,
) -> AppResult<(StatusCode, Json<ChangeRequest>)> {
    let request =
        changes::submit_change_request(&state, user.user_id, project_id, &input.content).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/changes
///
/// Admin review queue: pending first, then newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<ChangeRequestWithContext>>> {
    let list = ChangeRequestRepo::list_all(&state.pool).await?;
    Ok(Json(list))
}

/// POST /api/v1/changes/{id}/resolve
pub async fn resolve(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ChangeRequest>> {
    let request = changes::resolve_change_request(&state, id).await?;
    Ok(Json(request))
}
