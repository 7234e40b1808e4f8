//! Admin search handler.

use axum::extract::{Query, State};
use axum::Json;
use echotasks_db::models::profile::ProfileResponse;
use echotasks_db::models::project::ProjectWithClient;
use echotasks_db::repositories::SearchRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Query parameters for `GET /admin/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Response body for `GET /admin/search`.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub projects: Vec<ProjectWithClient>,
    pub clients: Vec<ProfileResponse>,
}

/// GET /api/v1/admin/search?q=
pub async fn search(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResults>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::BadRequest("Search query must not be empty".into()));
    }

    let (projects, clients) = tokio::try_join!(
        SearchRepo::search_projects(&state.pool, q),
        SearchRepo::search_clients(&state.pool, q),
    )?;

    Ok(Json(SearchResults { projects, clients }))
}
