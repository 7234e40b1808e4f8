//! Dashboard handlers: aggregate counts fetched in parallel.

use axum::extract::State;
use axum::Json;
use echotasks_core::status::ProjectStatus;
use echotasks_db::repositories::{DashboardRepo, NotificationRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Project counts broken down by lifecycle status.
#[derive(Debug, Serialize)]
pub struct ProjectCounts {
    pub total: i64,
    pub draft: i64,
    pub proposal_ready: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub on_hold: i64,
    pub cancelled: i64,
}

/// Response body for `GET /admin/dashboard`.
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub projects: ProjectCounts,
    pub pending_requests: i64,
    pub pending_change_requests: i64,
    pub clients: i64,
}

/// Response body for `GET /dashboard` (client view).
#[derive(Debug, Serialize)]
pub struct ClientDashboard {
    pub projects: i64,
    pub in_progress: i64,
    pub completed: i64,
    /// Notifications received within the last 24 hours.
    pub recent_notifications: i64,
}

/// GET /api/v1/admin/dashboard
pub async fn admin_dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<AdminDashboard>> {
    let pool = &state.pool;
    let (total, draft, proposal_ready, in_progress, completed, on_hold, cancelled) = tokio::try_join!(
        DashboardRepo::count_projects(pool, None),
        DashboardRepo::count_projects(pool, Some(ProjectStatus::Draft)),
        DashboardRepo::count_projects(pool, Some(ProjectStatus::ProposalReady)),
        DashboardRepo::count_projects(pool, Some(ProjectStatus::InProgress)),
        DashboardRepo::count_projects(pool, Some(ProjectStatus::Completed)),
        DashboardRepo::count_projects(pool, Some(ProjectStatus::OnHold)),
        DashboardRepo::count_projects(pool, Some(ProjectStatus::Cancelled)),
    )?;
    let (pending_requests, pending_change_requests, clients) = tokio::try_join!(
        DashboardRepo::count_pending_requests(pool),
        DashboardRepo::count_pending_changes(pool),
        DashboardRepo::count_clients(pool),
    )?;

    Ok(Json(AdminDashboard {
        projects: ProjectCounts {
            total,
            draft,
            proposal_ready,
            in_progress,
            completed,
            on_hold,
            cancelled,
        },
        pending_requests,
        pending_change_requests,
        clients,
    }))
}

/// GET /api/v1/dashboard
pub async fn client_dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<ClientDashboard>> {
    let pool = &state.pool;
    let (projects, in_progress, completed, recent_notifications) = tokio::try_join!(
        DashboardRepo::count_client_projects(pool, user.user_id, None),
        DashboardRepo::count_client_projects(pool, user.user_id, Some(ProjectStatus::InProgress)),
        DashboardRepo::count_client_projects(pool, user.user_id, Some(ProjectStatus::Completed)),
        NotificationRepo::recent_count(pool, user.user_id),
    )?;

    Ok(Json(ClientDashboard {
        projects,
        in_progress,
        completed,
        recent_notifications,
    }))
}
