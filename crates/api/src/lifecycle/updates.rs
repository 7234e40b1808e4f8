//! Posting progress updates and milestone status changes.

use echotasks_core::error::CoreError;
use echotasks_core::messages::{self, TITLE_NEW_UPDATE, TYPE_INFO};
use echotasks_core::roles::ROLE_ADMIN;
use echotasks_core::status::MilestoneStatus;
use echotasks_core::types::DbId;
use echotasks_db::models::milestone::Milestone;
use echotasks_db::models::update::{CreateUpdate, Update};
use echotasks_db::repositories::{MilestoneRepo, ProjectRepo, UpdateRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Post an update to a project's log.
///
/// Three steps with distinct failure policies:
/// 1. insert the update row (abort on failure),
/// 2. apply the tagged milestone status change, if any (log-and-continue),
/// 3. notify the owning client when someone else authored the update
///    (fire-and-forget).
pub async fn post_update(
    state: &AppState,
    author: &AuthUser,
    project_id: DbId,
    input: &CreateUpdate,
) -> AppResult<Update> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Update content must not be empty".into(),
        )));
    }

    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    if author.role != ROLE_ADMIN && author.user_id != project.client_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only staff or the project owner can post updates".into(),
        )));
    }

    // The tagged milestone is checked up front so a bad id fails the
    // request instead of tripping the FK on insert.
    if let Some(milestone_id) = input.milestone_id {
        let milestone = MilestoneRepo::find_by_id(&state.pool, milestone_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Milestone",
                id: milestone_id,
            }))?;
        if milestone.project_id != project_id {
            return Err(AppError::Core(CoreError::Validation(
                "Tagged milestone belongs to a different project".into(),
            )));
        }
    }

    let update = UpdateRepo::create(
        &state.pool,
        project_id,
        author.user_id,
        &input.content,
        &input.file_paths,
        input.milestone_id,
    )
    .await?;

    if let (Some(milestone_id), Some(status)) = (input.milestone_id, input.milestone_status) {
        match MilestoneRepo::set_status(&state.pool, milestone_id, status).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(milestone_id, "Tagged milestone not found; status unchanged");
            }
            Err(err) => {
                tracing::warn!(
                    milestone_id,
                    error = %err,
                    "Failed to apply milestone status from update"
                );
            }
        }
    }

    if author.user_id != project.client_id {
        state
            .notifier
            .notify(
                project.client_id,
                TITLE_NEW_UPDATE,
                &messages::update_posted(&project.title, &input.content),
                TYPE_INFO,
                Some(&format!("/projects/{project_id}")),
            )
            .await;
    }

    Ok(update)
}

/// Direct milestone status set. No ordering constraint between the
/// three milestone states.
pub async fn update_milestone_status(
    state: &AppState,
    milestone_id: DbId,
    status: MilestoneStatus,
) -> AppResult<Milestone> {
    if !MilestoneRepo::set_status(&state.pool, milestone_id, status).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }));
    }
    MilestoneRepo::find_by_id(&state.pool, milestone_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id: milestone_id,
        }))
}
