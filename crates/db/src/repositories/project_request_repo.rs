//! Repository for the `project_requests` table.

use echotasks_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::project_request::{
    CreateProjectRequest, ProjectRequest, ProjectRequestWithClient,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, title, description, budget_range, timeline_preference, \
                       status, created_at";

/// Provides CRUD and triage operations for project requests.
pub struct ProjectRequestRepo;

impl ProjectRequestRepo {
    /// Insert a new pending request for a client, returning the row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &CreateProjectRequest,
    ) -> Result<ProjectRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_requests \
                (client_id, title, description, budget_range, timeline_preference)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.budget_range)
            .bind(&input.timeline_preference)
            .fetch_one(pool)
            .await
    }

    /// Find a request by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_requests WHERE id = $1");
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all requests with client info, pending first, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProjectRequestWithClient>, sqlx::Error> {
        let query = "SELECT r.id, r.client_id, r.title, r.description, r.budget_range, \
                    r.timeline_preference, r.status, r.created_at, \
                    c.full_name AS client_name, c.email AS client_email \
             FROM project_requests r \
             JOIN profiles c ON c.id = r.client_id \
             ORDER BY (r.status = 'pending') DESC, r.created_at DESC";
        sqlx::query_as::<_, ProjectRequestWithClient>(query)
            .fetch_all(pool)
            .await
    }

    /// List a client's own requests, newest first.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ProjectRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_requests WHERE client_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Lock a request row for conversion.
    ///
    /// Transaction-scoped: takes the transaction's connection and
    /// acquires a `FOR UPDATE` row lock so two concurrent conversions
    /// of the same request serialize on the database.
    pub async fn lock_for_conversion(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ProjectRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ProjectRequest>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Mark a locked request converted. Transaction-scoped.
    pub async fn mark_converted(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE project_requests SET status = 'converted' WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Reject a pending request. Returns `true` if a row moved to
    /// `rejected`; `false` when the request was missing or already
    /// terminal.
    pub async fn reject(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_requests SET status = 'rejected' \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
