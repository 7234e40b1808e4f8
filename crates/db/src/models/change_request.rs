//! Change request entity model and DTOs.

use echotasks_core::status::ChangeRequestStatus;
use echotasks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `change_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChangeRequest {
    pub id: DbId,
    pub project_id: DbId,
    pub author_id: DbId,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub status: ChangeRequestStatus,
    pub created_at: Timestamp,
}

/// A change request joined with project title and author name, for the
/// admin review queue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChangeRequestWithContext {
    pub id: DbId,
    pub project_id: DbId,
    pub author_id: DbId,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub status: ChangeRequestStatus,
    pub created_at: Timestamp,
    pub project_title: String,
    pub author_name: String,
}

/// DTO for raising a change request against a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChangeRequest {
    pub content: String,
}
