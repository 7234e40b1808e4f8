//! Project update (progress log entry) model and DTOs.

use echotasks_core::status::MilestoneStatus;
use echotasks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An update row from the `updates` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Update {
    pub id: DbId,
    pub project_id: DbId,
    pub milestone_id: Option<DbId>,
    pub author_id: DbId,
    pub content: String,
    /// Ordered opaque file-store keys.
    pub file_paths: Vec<String>,
    pub created_at: Timestamp,
}

/// An update joined with its author's display name, for timelines.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UpdateWithAuthor {
    pub id: DbId,
    pub project_id: DbId,
    pub milestone_id: Option<DbId>,
    pub author_id: DbId,
    pub content: String,
    pub file_paths: Vec<String>,
    pub created_at: Timestamp,
    pub author_name: String,
}

/// DTO for posting a new update.
///
/// When both `milestone_id` and `milestone_status` are present, the
/// milestone's status is changed as a side effect of the post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUpdate {
    pub content: String,
    #[serde(default)]
    pub file_paths: Vec<String>,
    pub milestone_id: Option<DbId>,
    pub milestone_status: Option<MilestoneStatus>,
}
