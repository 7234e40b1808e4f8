//! Repository for the `profiles` table.

use echotasks_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, ProfileResponse, UpdateContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, password_hash, role, phone, is_active, \
                       created_at, updated_at";

/// Safe column list for response-shaped queries (no password hash).
const PUBLIC_COLUMNS: &str = "id, full_name, email, role, phone, is_active, created_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (full_name, email, password_hash, role, phone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (case-insensitive, emails are stored unique).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all client profiles, most recently created first.
    pub async fn list_clients(pool: &PgPool) -> Result<Vec<ProfileResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM profiles \
             WHERE role = 'client' \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProfileResponse>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a self-service contact update. Only non-`None` fields change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_contact(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }
}
