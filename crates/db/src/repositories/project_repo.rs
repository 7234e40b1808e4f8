//! Repository for the `projects` table.
//!
//! Status changes go through [`ProjectRepo::transition`], a
//! status-guarded conditional update: the row only changes when its
//! current status is one of the expected source states, so concurrent
//! or out-of-order transitions surface as `None` instead of silently
//! overwriting.

use echotasks_core::status::ProjectStatus;
use echotasks_core::types::DbId;
use sqlx::{PgPool, Postgres};

use crate::models::project::{CreateProject, Project, ProjectWithClient, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, client_id, title, description, status, start_date, end_date, created_at, updated_at";

/// Column list for client-joined queries (table-qualified).
const JOINED_COLUMNS: &str = "p.id, p.client_id, p.title, p.description, p.status, \
     p.start_date, p.end_date, p.created_at, p.updated_at, \
     c.full_name AS client_name, c.email AS client_email";

/// Provides CRUD and lifecycle operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with status `draft`, returning the created row.
    ///
    /// Generic over the executor so request conversion can create the
    /// project inside its transaction.
    pub async fn create<'e, E>(executor: E, input: &CreateProject) -> Result<Project, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO projects (client_id, title, description, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project joined with its owning client.
    pub async fn find_with_client(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM projects p \
             JOIN profiles c ON c.id = p.client_id \
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects with client info, optionally filtered by status.
    /// Most recently created first.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<ProjectStatus>,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let filter = if status.is_some() {
            "WHERE p.status = $1"
        } else {
            ""
        };
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM projects p \
             JOIN profiles c ON c.id = p.client_id \
             {filter} \
             ORDER BY p.created_at DESC"
        );
        let mut q = sqlx::query_as::<_, ProjectWithClient>(&query);
        if let Some(status) = status {
            q = q.bind(status.as_str());
        }
        q.fetch_all(pool).await
    }

    /// List a client's own projects, most recently created first.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE client_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update descriptive fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Move a project to `to` if its current status is one of `from`.
    ///
    /// Returns the updated row, or `None` when the project does not
    /// exist or is not in an accepted source state.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: &[ProjectStatus],
        to: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let from: Vec<&str> = from.iter().map(|s| s.as_str()).collect();
        let query = format!(
            "UPDATE projects SET status = $2, updated_at = NOW()
             WHERE id = $1 AND status = ANY($3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(to.as_str())
            .bind(&from)
            .fetch_optional(pool)
            .await
    }

    /// Approve the proposal: `proposal_ready -> in_progress`, stamping
    /// `start_date` with today unless one was already set.
    pub async fn start_work(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET status = 'in_progress',
                 start_date = COALESCE(start_date, CURRENT_DATE),
                 updated_at = NOW()
             WHERE id = $1 AND status = 'proposal_ready'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
