//! Handlers for comment threads under updates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use echotasks_core::error::CoreError;
use echotasks_core::types::DbId;
use echotasks_db::models::comment::{Comment, CommentWithAuthor, CreateComment};
use echotasks_db::repositories::{CommentRepo, UpdateRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// POST /api/v1/updates/{id}/comments
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(update_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment content must not be empty".into(),
        )));
    }
    if UpdateRepo::find_by_id(&state.pool, update_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Update",
            id: update_id,
        }));
    }

    let comment = CommentRepo::create(&state.pool, update_id, user.user_id, &input.content).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// GET /api/v1/updates/{id}/comments
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(update_id): Path<DbId>,
) -> AppResult<Json<Vec<CommentWithAuthor>>> {
    if UpdateRepo::find_by_id(&state.pool, update_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Update",
            id: update_id,
        }));
    }
    let comments = CommentRepo::list_for_update(&state.pool, update_id).await?;
    Ok(Json(comments))
}
