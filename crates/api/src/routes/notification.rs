//! Route definitions for the `/notifications` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET /               -> own notifications, newest first (?limit, ?offset)
/// GET /recent-count   -> count created in the last 24h
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list))
        .route("/recent-count", get(notification::recent_count))
}
