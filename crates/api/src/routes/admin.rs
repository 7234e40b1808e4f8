//! Route definitions for admin-only resources.

use axum::routing::get;
use axum::Router;

use crate::handlers::{client, dashboard, search};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /clients    -> list client accounts
/// POST /clients    -> create client account
/// GET  /search     -> substring search over projects and clients
/// GET  /dashboard  -> aggregate counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(client::list).post(client::create))
        .route("/search", get(search::search))
        .route("/dashboard", get(dashboard::admin_dashboard))
}
