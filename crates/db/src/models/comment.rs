//! Comment entity model and DTOs.

use echotasks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A comment row from the `comments` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub update_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// A comment joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub update_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub author_name: String,
}

/// DTO for posting a comment on an update.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
}
