//! Project entity model and DTOs.

use echotasks_core::status::ProjectStatus;
use echotasks_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project joined with its owning client's contact fields.
///
/// Tagged query shape for admin listings and the project detail view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithClient {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub client_name: String,
    pub client_email: String,
}

/// DTO for creating a new project (admin direct create or conversion).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// DTO for updating project fields. All fields are optional; status is
/// deliberately absent -- status moves only through lifecycle
/// operations.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
