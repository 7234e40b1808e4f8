//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use echotasks_core::error::CoreError;
use echotasks_core::progress::progress;
use echotasks_core::roles::ROLE_ADMIN;
use echotasks_core::status::ProjectStatus;
use echotasks_core::types::DbId;
use echotasks_db::models::change_request::ChangeRequest;
use echotasks_db::models::milestone::Milestone;
use echotasks_db::models::project::{CreateProject, Project, ProjectWithClient, UpdateProject};
use echotasks_db::repositories::{ChangeRequestRepo, MilestoneRepo, ProjectRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::lifecycle::proposals;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Query parameters for the admin project list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Full project detail: project + client contact + milestones in
/// display order + change requests + progress recomputed from
/// milestone statuses.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectWithClient,
    pub milestones: Vec<Milestone>,
    pub change_requests: Vec<ChangeRequest>,
    /// Percentage of completed milestones, 0-100. Never stored.
    pub progress: u8,
}

/// Request body for `POST /projects/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ProjectStatus,
}

/// GET /api/v1/projects
///
/// Admins see every project (optionally filtered by `?status=`);
/// clients see only their own.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListQuery>,
) -> AppResult<Response> {
    if user.role == ROLE_ADMIN {
        let status = query
            .status
            .as_deref()
            .map(str::parse::<ProjectStatus>)
            .transpose()
            .map_err(AppError::BadRequest)?;
        let all = ProjectRepo::list_all(&state.pool, status).await?;
        Ok(Json(all).into_response())
    } else {
        let own = ProjectRepo::list_for_client(&state.pool, user.user_id).await?;
        Ok(Json(own).into_response())
    }
}

/// POST /api/v1/projects
///
/// Admin direct create, bypassing the request flow. Starts in `draft`.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project title must not be empty".into(),
        )));
    }
    let project = ProjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects/{id}
pub async fn get_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectDetail>> {
    let project = ProjectRepo::find_with_client(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    check_read_access(&user, project.client_id)?;

    let (milestones, change_requests) = tokio::try_join!(
        MilestoneRepo::list_for_project(&state.pool, id),
        ChangeRequestRepo::list_for_project(&state.pool, id),
    )?;
    let statuses: Vec<_> = milestones.iter().map(|m| m.status).collect();

    Ok(Json(ProjectDetail {
        project,
        progress: progress(&statuses),
        milestones,
        change_requests,
    }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/submit-proposal
pub async fn submit_proposal(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = proposals::submit_proposal(&state, id).await?;
    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = proposals::approve_proposal(&state, user.user_id, id).await?;
    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/status
///
/// Manual admin transition to `on_hold`, `cancelled`, or `completed`.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<Project>> {
    let project = proposals::set_status(&state, id, input.status).await?;
    Ok(Json(project))
}

/// Clients may only read projects they own; admins read everything.
pub(crate) fn check_read_access(user: &AuthUser, client_id: DbId) -> AppResult<()> {
    if user.role != ROLE_ADMIN && user.user_id != client_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this project".into(),
        )));
    }
    Ok(())
}
