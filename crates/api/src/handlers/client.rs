//! Admin handlers for client account management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use echotasks_core::error::CoreError;
use echotasks_core::roles::ROLE_CLIENT;
use echotasks_db::models::profile::{CreateProfile, ProfileResponse};
use echotasks_db::repositories::ProfileRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/clients`.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// GET /api/v1/admin/clients
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<ProfileResponse>>> {
    let clients = ProfileRepo::list_clients(&state.pool).await?;
    Ok(Json(clients))
}

/// POST /api/v1/admin/clients
///
/// Creates a client account. Duplicate emails surface as 409 via the
/// `uq_profiles_email` constraint.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateClientRequest>,
) -> AppResult<(StatusCode, Json<ProfileResponse>)> {
    if input.full_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Full name must not be empty".into(),
        )));
    }
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            full_name: input.full_name,
            email: input.email,
            password_hash,
            role: ROLE_CLIENT.to_string(),
            phone: input.phone,
        },
    )
    .await?;

    tracing::info!(client_id = profile.id, "Client account created");
    Ok((StatusCode::CREATED, Json(profile.into())))
}
