//! Project request intake: submit, convert, reject.

use echotasks_core::error::CoreError;
use echotasks_core::messages::{self, TITLE_REQUEST_RECEIVED, TYPE_INFO};
use echotasks_core::status::RequestStatus;
use echotasks_core::types::DbId;
use echotasks_db::models::project::{CreateProject, Project};
use echotasks_db::models::project_request::{CreateProjectRequest, ProjectRequest};
use echotasks_db::repositories::{ProjectRepo, ProjectRequestRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Optional overrides applied when a request becomes a project.
/// Absent fields are copied from the request.
#[derive(Debug, Default, Deserialize)]
pub struct ConvertRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<echotasks_core::types::Date>,
    pub end_date: Option<echotasks_core::types::Date>,
}

/// A client submits a new project request.
///
/// Effects: insert the pending request (abort on failure), then confirm
/// receipt to the client (fire-and-forget).
pub async fn submit_request(
    state: &AppState,
    client_id: DbId,
    input: &CreateProjectRequest,
) -> AppResult<ProjectRequest> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Request title must not be empty".into(),
        )));
    }
    if input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Request description must not be empty".into(),
        )));
    }

    let request = ProjectRequestRepo::create(&state.pool, client_id, input).await?;
    tracing::info!(request_id = request.id, client_id, "Project request submitted");

    state
        .notifier
        .notify(
            client_id,
            TITLE_REQUEST_RECEIVED,
            &messages::request_received(&request.title),
            TYPE_INFO,
            Some("/requests"),
        )
        .await;

    Ok(request)
}

/// An admin converts a pending request into a draft project.
///
/// Runs in one transaction: the request row is locked `FOR UPDATE`, so
/// two concurrent conversions serialize and the loser sees a
/// non-pending status and gets `Conflict`. Exactly one project exists
/// per accepted conversion.
pub async fn convert_request(
    state: &AppState,
    request_id: DbId,
    overrides: &ConvertRequest,
) -> AppResult<Project> {
    let mut tx = state.pool.begin().await?;

    let request = ProjectRequestRepo::lock_for_conversion(&mut tx, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectRequest",
            id: request_id,
        }))?;

    if request.status != RequestStatus::Pending {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Request is already {}",
            request.status
        ))));
    }

    let input = CreateProject {
        client_id: request.client_id,
        title: overrides.title.clone().unwrap_or(request.title),
        description: overrides
            .description
            .clone()
            .or(Some(request.description)),
        start_date: overrides.start_date,
        end_date: overrides.end_date,
    };
    let project = ProjectRepo::create(&mut *tx, &input).await?;
    ProjectRequestRepo::mark_converted(&mut tx, request_id).await?;

    tx.commit().await?;
    tracing::info!(
        request_id,
        project_id = project.id,
        "Converted project request"
    );
    Ok(project)
}

/// An admin rejects a pending request. Terminal.
pub async fn reject_request(state: &AppState, request_id: DbId) -> AppResult<()> {
    if ProjectRequestRepo::reject(&state.pool, request_id).await? {
        tracing::info!(request_id, "Rejected project request");
        return Ok(());
    }

    // Distinguish missing from already-resolved.
    match ProjectRequestRepo::find_by_id(&state.pool, request_id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectRequest",
            id: request_id,
        })),
        Some(request) => Err(AppError::Core(CoreError::Conflict(format!(
            "Request is already {}",
            request.status
        )))),
    }
}
