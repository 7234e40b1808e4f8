//! Handlers for the `/requests` resource (project request intake).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use echotasks_core::roles::ROLE_ADMIN;
use echotasks_core::types::DbId;
use echotasks_db::models::project::Project;
use echotasks_db::models::project_request::{CreateProjectRequest, ProjectRequest};
use echotasks_db::repositories::ProjectRequestRepo;

use crate::error::AppResult;
use crate::lifecycle::requests::{self, ConvertRequest};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// POST /api/v1/requests
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectRequest>)> {
    let request = requests::submit_request(&state, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/requests
///
/// Admins see every request (pending first, with client info); clients
/// see only their own.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Response> {
    if user.role == ROLE_ADMIN {
        let all = ProjectRequestRepo::list_all(&state.pool).await?;
        Ok(Json(all).into_response())
    } else {
        let own = ProjectRequestRepo::list_for_client(&state.pool, user.user_id).await?;
        Ok(Json(own).into_response())
    }
}

/// POST /api/v1/requests/{id}/convert
///
/// Body is optional; absent fields are copied from the request.
pub async fn convert(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    overrides: Option<Json<ConvertRequest>>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let overrides = overrides.map(|Json(o)| o).unwrap_or_default();
    let project = requests::convert_request(&state, id, &overrides).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// POST /api/v1/requests/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    requests::reject_request(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
