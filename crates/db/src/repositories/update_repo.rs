//! Repository for the `updates` table.

use echotasks_core::types::DbId;
use sqlx::PgPool;

use crate::models::update::{Update, UpdateWithAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, milestone_id, author_id, content, file_paths, created_at";

/// Provides append and read operations for project updates.
pub struct UpdateRepo;

impl UpdateRepo {
    /// Append an update to a project's log, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        author_id: DbId,
        content: &str,
        file_paths: &[String],
        milestone_id: Option<DbId>,
    ) -> Result<Update, sqlx::Error> {
        let query = format!(
            "INSERT INTO updates (project_id, milestone_id, author_id, content, file_paths)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Update>(&query)
            .bind(project_id)
            .bind(milestone_id)
            .bind(author_id)
            .bind(content)
            .bind(file_paths)
            .fetch_one(pool)
            .await
    }

    /// Find an update by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Update>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM updates WHERE id = $1");
        sqlx::query_as::<_, Update>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's updates with author names, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<UpdateWithAuthor>, sqlx::Error> {
        let query = "SELECT u.id, u.project_id, u.milestone_id, u.author_id, u.content, \
                    u.file_paths, u.created_at, a.full_name AS author_name \
             FROM updates u \
             JOIN profiles a ON a.id = u.author_id \
             WHERE u.project_id = $1 \
             ORDER BY u.created_at DESC";
        sqlx::query_as::<_, UpdateWithAuthor>(query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
