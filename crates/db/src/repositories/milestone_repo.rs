//! Repository for the `milestones` table.

use echotasks_core::status::MilestoneStatus;
use echotasks_core::types::DbId;
use sqlx::PgPool;

use crate::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, start_date, end_date, \
                       due_date, file_path, created_at";

/// Provides CRUD operations for milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Insert a new pending milestone, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMilestone,
    ) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones \
                (project_id, title, description, start_date, end_date, due_date, file_path)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.due_date)
            .bind(&input.file_path)
            .fetch_one(pool)
            .await
    }

    /// Find a milestone by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's milestones in display order (due date, then
    /// creation order for undated ones).
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestones \
             WHERE project_id = $1 \
             ORDER BY due_date ASC NULLS LAST, created_at ASC"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch only the statuses of a project's milestones, for progress
    /// computation.
    pub async fn statuses_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MilestoneStatus>, sqlx::Error> {
        let raw: Vec<String> =
            sqlx::query_scalar("SELECT status FROM milestones WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(pool)
                .await?;
        raw.into_iter()
            .map(|s| {
                s.parse::<MilestoneStatus>()
                    .map_err(|e| sqlx::Error::Decode(e.into()))
            })
            .collect()
    }

    /// Update descriptive fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMilestone,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                due_date = COALESCE($6, due_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Set a milestone's status. Any of the three states may be set at
    /// any time; there is no ordering constraint.
    ///
    /// Returns `true` if a row was updated.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: MilestoneStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE milestones SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
