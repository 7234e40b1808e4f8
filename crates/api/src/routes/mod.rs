pub mod admin;
pub mod auth;
pub mod change;
pub mod health;
pub mod milestone;
pub mod notification;
pub mod project;
pub mod request;
pub mod update;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                     login (public)
/// /auth/refresh                   refresh (public)
/// /auth/logout                    logout (requires auth)
///
/// /profile                        get, update own contact info
///
/// /admin/clients                  list, create client accounts (admin)
/// /admin/search                   substring search (admin)
/// /admin/dashboard                aggregate counts (admin)
///
/// /dashboard                      client dashboard counts
///
/// /requests                       list, create
/// /requests/{id}/convert          convert to draft project (admin)
/// /requests/{id}/reject           reject (admin)
///
/// /projects                       list, create
/// /projects/{id}                  detail, update
/// /projects/{id}/submit-proposal  draft -> proposal_ready (admin)
/// /projects/{id}/approve          proposal_ready -> in_progress (owner)
/// /projects/{id}/status           hold / cancel / complete (admin)
/// /projects/{id}/milestones       add milestone (admin)
/// /projects/{id}/updates          list, post updates
/// /projects/{id}/changes          raise change request
///
/// /milestones/{id}                update fields (admin)
/// /milestones/{id}/status         set status (admin)
///
/// /updates/{id}/comments          list, append comments
///
/// /changes                        review queue (admin)
/// /changes/{id}/resolve           approve, idempotent (admin)
///
/// /notifications                  own notifications (paged)
/// /notifications/recent-count     24h count
///
/// /uploads                        multipart file upload
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Own profile.
        .route(
            "/profile",
            get(handlers::profile::get_own).put(handlers::profile::update_own),
        )
        // Admin: client accounts, search, dashboard.
        .nest("/admin", admin::router())
        // Client dashboard counts.
        .route("/dashboard", get(handlers::dashboard::client_dashboard))
        // Project request intake and triage.
        .nest("/requests", request::router())
        // Projects (also nests milestones, updates, change requests).
        .nest("/projects", project::router())
        // Milestone edits and status.
        .nest("/milestones", milestone::router())
        // Comment threads under updates.
        .nest("/updates", update::router())
        // Change request review queue.
        .nest("/changes", change::router())
        // Notifications.
        .nest("/notifications", notification::router())
        // File uploads to the object store.
        .route("/uploads", post(handlers::upload::create))
}
