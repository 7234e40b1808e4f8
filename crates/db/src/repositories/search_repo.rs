//! Repository for admin search.
//!
//! Search is deliberately a plain case-insensitive substring match
//! (`ILIKE '%q%'`) over projects and client profiles -- there is no
//! ranking or full-text machinery.

use sqlx::PgPool;

use crate::models::profile::ProfileResponse;
use crate::models::project::ProjectWithClient;

/// Maximum rows returned per entity type.
const SEARCH_LIMIT: i64 = 25;

/// Provides substring search over projects and client profiles.
pub struct SearchRepo;

impl SearchRepo {
    /// Search projects by title or description.
    pub async fn search_projects(
        pool: &PgPool,
        query: &str,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let pattern = like_pattern(query);
        sqlx::query_as::<_, ProjectWithClient>(
            "SELECT p.id, p.client_id, p.title, p.description, p.status, \
                    p.start_date, p.end_date, p.created_at, p.updated_at, \
                    c.full_name AS client_name, c.email AS client_email \
             FROM projects p \
             JOIN profiles c ON c.id = p.client_id \
             WHERE p.title ILIKE $1 OR p.description ILIKE $1 \
             ORDER BY p.created_at DESC \
             LIMIT $2",
        )
        .bind(&pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// Search client profiles by name or email.
    pub async fn search_clients(
        pool: &PgPool,
        query: &str,
    ) -> Result<Vec<ProfileResponse>, sqlx::Error> {
        let pattern = like_pattern(query);
        sqlx::query_as::<_, ProfileResponse>(
            "SELECT id, full_name, email, role, phone, is_active, created_at \
             FROM profiles \
             WHERE role = 'client' AND (full_name ILIKE $1 OR email ILIKE $1) \
             ORDER BY created_at DESC \
             LIMIT $2",
        )
        .bind(&pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(pool)
        .await
    }
}

/// Build an ILIKE pattern, escaping LIKE metacharacters in user input.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
