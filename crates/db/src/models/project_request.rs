//! Project request entity model and DTOs.

use echotasks_core::status::RequestStatus;
use echotasks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRequest {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: String,
    pub budget_range: Option<String>,
    pub timeline_preference: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub created_at: Timestamp,
}

/// A request joined with the requesting client's contact fields, for
/// the admin triage list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRequestWithClient {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub description: String,
    pub budget_range: Option<String>,
    pub timeline_preference: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub client_name: String,
    pub client_email: String,
}

/// DTO for a client submitting a new project request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub budget_range: Option<String>,
    pub timeline_preference: Option<String>,
}
