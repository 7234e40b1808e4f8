//! Profile entity model and DTOs.

use echotasks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full profile row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    /// Role name: `"admin"` or `"client"`.
    pub role: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        ProfileResponse {
            id: p.id,
            full_name: p.full_name,
            email: p.email,
            role: p.role,
            phone: p.phone,
            is_active: p.is_active,
            created_at: p.created_at,
        }
    }
}

/// DTO for creating a new profile. The password arrives pre-hashed.
#[derive(Debug)]
pub struct CreateProfile {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
}

/// DTO for a profile's self-service contact update.
#[derive(Debug, Deserialize)]
pub struct UpdateContact {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}
