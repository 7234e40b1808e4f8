//! Proposal flow and manual project status transitions.

use echotasks_core::error::CoreError;
use echotasks_core::messages::{self, TITLE_PROPOSAL_READY, TYPE_ACTION_REQUIRED};
use echotasks_core::status::ProjectStatus;
use echotasks_core::types::DbId;
use echotasks_db::models::project::Project;
use echotasks_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// An admin publishes the proposal: `draft -> proposal_ready`.
///
/// Idempotent when the project is already `proposal_ready`; any other
/// state is a conflict. On an actual transition the owning client is
/// asked to review (fire-and-forget).
pub async fn submit_proposal(state: &AppState, project_id: DbId) -> AppResult<Project> {
    let transitioned = ProjectRepo::transition(
        &state.pool,
        project_id,
        &[ProjectStatus::Draft],
        ProjectStatus::ProposalReady,
    )
    .await?;

    let project = match transitioned {
        Some(project) => project,
        None => {
            let project = load(state, project_id).await?;
            return if project.status == ProjectStatus::ProposalReady {
                Ok(project)
            } else {
                Err(conflict(project.status, ProjectStatus::ProposalReady))
            };
        }
    };

    tracing::info!(project_id, "Proposal submitted for review");
    state
        .notifier
        .notify(
            project.client_id,
            TITLE_PROPOSAL_READY,
            &messages::proposal_ready(&project.title),
            TYPE_ACTION_REQUIRED,
            Some(&format!("/projects/{project_id}")),
        )
        .await;

    Ok(project)
}

/// The owning client approves the proposal: `proposal_ready ->
/// in_progress`, stamping `start_date` with today unless already set.
///
/// Only the project's client may approve; anyone else gets
/// `Unauthorized` with no mutation. Approving an already `in_progress`
/// project is a no-op success.
pub async fn approve_proposal(
    state: &AppState,
    actor_id: DbId,
    project_id: DbId,
) -> AppResult<Project> {
    let project = load(state, project_id).await?;

    if actor_id != project.client_id {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Only the project owner can approve the proposal".into(),
        )));
    }

    if project.status == ProjectStatus::InProgress {
        return Ok(project);
    }

    match ProjectRepo::start_work(&state.pool, project_id).await? {
        Some(project) => {
            tracing::info!(project_id, "Proposal approved, work started");
            Ok(project)
        }
        None => Err(conflict(project.status, ProjectStatus::InProgress)),
    }
}

/// An admin manually moves a project to `on_hold`, `cancelled`, or
/// `completed`. Completion is never derived from milestone progress.
pub async fn set_status(
    state: &AppState,
    project_id: DbId,
    to: ProjectStatus,
) -> AppResult<Project> {
    if !matches!(
        to,
        ProjectStatus::OnHold | ProjectStatus::Cancelled | ProjectStatus::Completed
    ) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Status {to} cannot be set directly"
        ))));
    }

    let project = load(state, project_id).await?;
    if project.status == to {
        return Ok(project);
    }
    if !project.status.can_transition(to) {
        return Err(conflict(project.status, to));
    }

    ProjectRepo::transition(&state.pool, project_id, &[project.status], to)
        .await?
        .inspect(|_| tracing::info!(project_id, status = %to, "Project status changed"))
        .ok_or_else(|| conflict(project.status, to))
}

async fn load(state: &AppState, project_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
}

fn conflict(from: ProjectStatus, to: ProjectStatus) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Cannot move project from {from} to {to}"
    )))
}
