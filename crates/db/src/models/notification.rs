//! Notification entity model.
//!
//! Notifications are write-once: there is no read/unread flag. The
//! dashboards treat "created within the last 24 hours" as unread.

use echotasks_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    /// `"info"` or `"action_required"`.
    pub r#type: String,
    pub link: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub r#type: String,
    pub link: Option<String>,
}
