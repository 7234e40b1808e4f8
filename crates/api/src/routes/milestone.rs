//! Route definitions for the `/milestones` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::milestone;
use crate::state::AppState;

/// Routes mounted at `/milestones`.
///
/// ```text
/// PUT  /{id}         -> update fields (admin)
/// POST /{id}/status  -> set status (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(milestone::update))
        .route("/{id}/status", post(milestone::set_status))
}
