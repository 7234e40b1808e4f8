//! Repository for the `comments` table.

use echotasks_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, update_id, author_id, content, created_at";

/// Provides append and read operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Append a comment to an update's thread, returning the row.
    pub async fn create(
        pool: &PgPool,
        update_id: DbId,
        author_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (update_id, author_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(update_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List an update's comments with author names, oldest first.
    pub async fn list_for_update(
        pool: &PgPool,
        update_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = "SELECT c.id, c.update_id, c.author_id, c.content, c.created_at, \
                    a.full_name AS author_name \
             FROM comments c \
             JOIN profiles a ON a.id = c.author_id \
             WHERE c.update_id = $1 \
             ORDER BY c.created_at ASC";
        sqlx::query_as::<_, CommentWithAuthor>(query)
            .bind(update_id)
            .fetch_all(pool)
            .await
    }
}
