//! Route definitions for the `/changes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::change_request;
use crate::state::AppState;

/// Routes mounted at `/changes`.
///
/// ```text
/// GET  /               -> review queue, pending first (admin)
/// POST /{id}/resolve   -> pending -> approved, idempotent (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(change_request::list))
        .route("/{id}/resolve", post(change_request::resolve))
}
