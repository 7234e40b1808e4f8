//! Handlers for the authenticated user's notifications.

use axum::extract::{Query, State};
use axum::Json;
use echotasks_db::models::notification::Notification;
use echotasks_db::repositories::NotificationRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for `GET /notifications/recent-count`.
#[derive(Debug, Serialize)]
pub struct RecentCountResponse {
    /// Notifications created within the last 24 hours. There is no
    /// persisted read flag; recency stands in for "unread".
    pub count: i64,
}

/// GET /api/v1/notifications
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);
    let items = NotificationRepo::list_for_user(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(items))
}

/// GET /api/v1/notifications/recent-count
pub async fn recent_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<RecentCountResponse>> {
    let count = NotificationRepo::recent_count(&state.pool, user.user_id).await?;
    Ok(Json(RecentCountResponse { count }))
}
