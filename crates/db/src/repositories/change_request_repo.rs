//! Repository for the `change_requests` table.

use echotasks_core::types::DbId;
use sqlx::PgPool;

use crate::models::change_request::{ChangeRequest, ChangeRequestWithContext};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, author_id, content, status, created_at";

/// Provides CRUD and resolution operations for change requests.
pub struct ChangeRequestRepo;

impl ChangeRequestRepo {
    /// Insert a new pending change request, returning the row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        author_id: DbId,
        content: &str,
    ) -> Result<ChangeRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_requests (project_id, author_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeRequest>(&query)
            .bind(project_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List all change requests with project/author context for the
    /// admin review queue: pending first, then newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ChangeRequestWithContext>, sqlx::Error> {
        let query = "SELECT r.id, r.project_id, r.author_id, r.content, r.status, r.created_at, \
                    p.title AS project_title, a.full_name AS author_name \
             FROM change_requests r \
             JOIN projects p ON p.id = r.project_id \
             JOIN profiles a ON a.id = r.author_id \
             ORDER BY (r.status = 'pending') DESC, r.created_at DESC";
        sqlx::query_as::<_, ChangeRequestWithContext>(query)
            .fetch_all(pool)
            .await
    }

    /// List change requests raised against one project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ChangeRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_requests WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ChangeRequest>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Resolve a change request: `pending -> approved`.
    ///
    /// Idempotent: re-approving an approved request sets the same
    /// value and still returns the row. Returns `None` only when the
    /// request does not exist.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<ChangeRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE change_requests SET status = 'approved'
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
