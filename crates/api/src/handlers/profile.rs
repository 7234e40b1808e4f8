//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::Json;
use echotasks_core::error::CoreError;
use echotasks_db::models::profile::{ProfileResponse, UpdateContact};
use echotasks_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_own(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<ProfileResponse>> {
    let profile = ProfileRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;
    Ok(Json(profile.into()))
}

/// PUT /api/v1/profile
///
/// Self-service contact update (full name, phone). Email and role are
/// not editable here.
pub async fn update_own(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<UpdateContact>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = ProfileRepo::update_contact(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: user.user_id,
        }))?;
    Ok(Json(profile.into()))
}
