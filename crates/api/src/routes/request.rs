//! Route definitions for the `/requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project_request;
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// GET  /              -> list (admin: all; client: own)
/// POST /              -> create (client)
/// POST /{id}/convert  -> convert to draft project (admin)
/// POST /{id}/reject   -> reject (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(project_request::list).post(project_request::create),
        )
        .route("/{id}/convert", post(project_request::convert))
        .route("/{id}/reject", post(project_request::reject))
}
