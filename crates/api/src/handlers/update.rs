//! Handlers for project updates (the progress log).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use echotasks_core::error::CoreError;
use echotasks_core::types::DbId;
use echotasks_db::models::update::{CreateUpdate, Update, UpdateWithAuthor};
use echotasks_db::repositories::{ProjectRepo, UpdateRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::project::check_read_access;
use crate::lifecycle::updates;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/updates
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateUpdate>,
) -> AppResult<(StatusCode, Json<Update>)> {
    let update = updates::post_update(&state, &user, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(update)))
}

/// GET /api/v1/projects/{id}/updates
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<UpdateWithAuthor>>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    check_read_access(&user, project.client_id)?;

    let list = UpdateRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(list))
}
