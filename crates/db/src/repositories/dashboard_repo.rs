//! Count queries backing the admin and client dashboards.
//!
//! Each count is an independent read; the handlers fetch them in
//! parallel and combine the results once all complete.

use echotasks_core::status::ProjectStatus;
use echotasks_core::types::DbId;
use sqlx::PgPool;

/// Provides aggregate counts for dashboard views.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Count all projects, optionally restricted to one status.
    pub async fn count_projects(
        pool: &PgPool,
        status: Option<ProjectStatus>,
    ) -> Result<i64, sqlx::Error> {
        match status {
            Some(status) => {
                count(pool, "SELECT COUNT(*) FROM projects WHERE status = $1", Some(status.as_str())).await
            }
            None => count(pool, "SELECT COUNT(*) FROM projects", None).await,
        }
    }

    /// Count a client's projects, optionally restricted to one status.
    pub async fn count_client_projects(
        pool: &PgPool,
        client_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<i64, sqlx::Error> {
        let result: Option<i64> = match status {
            Some(status) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM projects WHERE client_id = $1 AND status = $2",
                )
                .bind(client_id)
                .bind(status.as_str())
                .fetch_one(pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE client_id = $1")
                    .bind(client_id)
                    .fetch_one(pool)
                    .await?
            }
        };
        Ok(result.unwrap_or(0))
    }

    /// Count pending project requests.
    pub async fn count_pending_requests(pool: &PgPool) -> Result<i64, sqlx::Error> {
        count(
            pool,
            "SELECT COUNT(*) FROM project_requests WHERE status = $1",
            Some("pending"),
        )
        .await
    }

    /// Count pending change requests.
    pub async fn count_pending_changes(pool: &PgPool) -> Result<i64, sqlx::Error> {
        count(
            pool,
            "SELECT COUNT(*) FROM change_requests WHERE status = $1",
            Some("pending"),
        )
        .await
    }

    /// Count active client profiles.
    pub async fn count_clients(pool: &PgPool) -> Result<i64, sqlx::Error> {
        count(
            pool,
            "SELECT COUNT(*) FROM profiles WHERE role = $1 AND is_active = true",
            Some("client"),
        )
        .await
    }
}

async fn count(pool: &PgPool, query: &str, bind: Option<&str>) -> Result<i64, sqlx::Error> {
    let mut q = sqlx::query_scalar::<_, Option<i64>>(query);
    if let Some(value) = bind {
        q = q.bind(value);
    }
    Ok(q.fetch_one(pool).await?.unwrap_or(0))
}
