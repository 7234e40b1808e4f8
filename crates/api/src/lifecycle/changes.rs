//! Change requests raised against in-flight projects.

use echotasks_core::error::CoreError;
use echotasks_core::types::DbId;
use echotasks_db::models::change_request::ChangeRequest;
use echotasks_db::repositories::{ChangeRequestRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Raise a pending change request against a project.
///
/// Authorship is deliberately open to any authenticated actor, so staff
/// can record change requests received out of band.
pub async fn submit_change_request(
    state: &AppState,
    author_id: DbId,
    project_id: DbId,
    content: &str,
) -> AppResult<ChangeRequest> {
    if content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Change request content must not be empty".into(),
        )));
    }

    if ProjectRepo::find_by_id(&state.pool, project_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }

    let request = ChangeRequestRepo::create(&state.pool, project_id, author_id, content).await?;
    tracing::info!(
        change_request_id = request.id,
        project_id,
        "Change request submitted"
    );
    Ok(request)
}

/// Resolve a change request: `pending -> approved`. Idempotent on
/// repeat calls.
pub async fn resolve_change_request(state: &AppState, id: DbId) -> AppResult<ChangeRequest> {
    ChangeRequestRepo::approve(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChangeRequest",
            id,
        }))
}
