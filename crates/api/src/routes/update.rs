//! Route definitions for the `/updates` resource (comment threads).

use axum::routing::get;
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/updates`.
///
/// ```text
/// GET  /{id}/comments  -> list thread, oldest first
/// POST /{id}/comments  -> append comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/comments", get(comment::list).post(comment::create))
}
