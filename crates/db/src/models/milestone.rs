//! Milestone entity model and DTOs.

use echotasks_core::status::MilestoneStatus;
use echotasks_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A milestone row from the `milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: MilestoneStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub due_date: Option<Date>,
    /// Opaque key into the file store.
    pub file_path: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMilestone {
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub due_date: Option<Date>,
    pub file_path: Option<String>,
}

/// DTO for editing milestone fields. All fields are optional; status
/// changes go through the dedicated status operation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMilestone {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub due_date: Option<Date>,
}
