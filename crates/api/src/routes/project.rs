//! Route definitions for the `/projects` resource.
//!
//! Also nests milestone creation, the update log, and change requests
//! under `/projects/{id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{change_request, milestone, project, update};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET  /                      -> list (admin: all + ?status=; client: own)
/// POST /                      -> create (admin, starts draft)
/// GET  /{id}                  -> detail (project + client + milestones + progress)
/// PUT  /{id}                  -> update fields (admin)
/// POST /{id}/submit-proposal  -> draft -> proposal_ready (admin)
/// POST /{id}/approve          -> proposal_ready -> in_progress (owning client)
/// POST /{id}/status           -> on_hold / cancelled / completed (admin)
///
/// POST /{id}/milestones       -> add milestone (admin)
/// GET  /{id}/updates          -> update log with author names
/// POST /{id}/updates          -> post update (admin or owner)
/// POST /{id}/changes          -> raise change request (authenticated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_detail).put(project::update))
        .route("/{id}/submit-proposal", post(project::submit_proposal))
        .route("/{id}/approve", post(project::approve))
        .route("/{id}/status", post(project::set_status))
        .route("/{id}/milestones", post(milestone::create))
        .route("/{id}/updates", get(update::list).post(update::create))
        .route("/{id}/changes", post(change_request::create))
}
