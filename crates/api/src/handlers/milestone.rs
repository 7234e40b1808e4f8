//! Handlers for milestones (admin-managed).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use echotasks_core::error::CoreError;
use echotasks_core::status::MilestoneStatus;
use echotasks_core::types::DbId;
use echotasks_db::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};
use echotasks_db::repositories::{MilestoneRepo, ProjectRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::lifecycle::updates;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /milestones/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: MilestoneStatus,
}

/// POST /api/v1/projects/{id}/milestones
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<Milestone>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Milestone title must not be empty".into(),
        )));
    }
    if ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }

    let milestone = MilestoneRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

/// PUT /api/v1/milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<Milestone>> {
    let milestone = MilestoneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;
    Ok(Json(milestone))
}

/// POST /api/v1/milestones/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<Milestone>> {
    let milestone = updates::update_milestone_status(&state, id, input.status).await?;
    Ok(Json(milestone))
}
