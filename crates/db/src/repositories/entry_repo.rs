//! Repository for the `timesheet_entries` table.
//!
//! Mutating methods and the aggregate-sum queries take any `PgExecutor` so
//! the engine can run them inside a transaction; plain listings take the
//! pool directly.

use chrono::NaiveDate;
use punchcard_core::status::TimesheetStatus;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::entry::{CreateEntry, SubmittedEntry, TimesheetEntry, UpdateEntry};

/// Column list for timesheet_entries queries.
const ENTRY_COLUMNS: &str = "entry_id, email, week_start, work_date, hours, project, \
    description, work_type, status, created_at, updated_at";

/// Provides CRUD, aggregate-sum, and status-flip operations for entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new entry, returning the created row.
    pub async fn insert(
        executor: impl PgExecutor<'_>,
        input: &CreateEntry,
    ) -> Result<TimesheetEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO timesheet_entries
                (entry_id, email, week_start, work_date, hours, project, description,
                 work_type, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, TimesheetEntry>(&query)
            .bind(input.entry_id)
            .bind(&input.email)
            .bind(input.week_start)
            .bind(input.work_date)
            .bind(input.hours)
            .bind(&input.project)
            .bind(&input.description)
            .bind(&input.work_type)
            .bind(&input.status)
            .fetch_one(executor)
            .await
    }

    /// Find an entry by its ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        entry_id: Uuid,
    ) -> Result<Option<TimesheetEntry>, sqlx::Error> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM timesheet_entries WHERE entry_id = $1");
        sqlx::query_as::<_, TimesheetEntry>(&query)
            .bind(entry_id)
            .fetch_optional(executor)
            .await
    }

    /// List one owner's entries for a week, date-ascending.
    pub async fn list_week(
        pool: &PgPool,
        email: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<TimesheetEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM timesheet_entries
             WHERE email = $1 AND week_start = $2
             ORDER BY work_date ASC, created_at ASC"
        );
        sqlx::query_as::<_, TimesheetEntry>(&query)
            .bind(email)
            .bind(week_start)
            .fetch_all(pool)
            .await
    }

    /// List a week's entries inside a transaction, locking the rows until
    /// commit so a concurrent status flip cannot interleave.
    pub async fn list_week_for_update(
        executor: impl PgExecutor<'_>,
        email: &str,
        week_start: NaiveDate,
    ) -> Result<Vec<TimesheetEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM timesheet_entries
             WHERE email = $1 AND week_start = $2
             ORDER BY work_date ASC, created_at ASC
             FOR UPDATE"
        );
        sqlx::query_as::<_, TimesheetEntry>(&query)
            .bind(email)
            .bind(week_start)
            .fetch_all(executor)
            .await
    }

    /// Sum of hours logged by `email` on `work_date`, excluding
    /// `exclude_entry` when given (so an update does not count the entry
    /// being changed against itself).
    pub async fn daily_hours(
        executor: impl PgExecutor<'_>,
        email: &str,
        work_date: NaiveDate,
        exclude_entry: Option<Uuid>,
    ) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(hours), 0)
             FROM timesheet_entries
             WHERE email = $1
               AND work_date = $2
               AND ($3::uuid IS NULL OR entry_id <> $3)",
        )
        .bind(email)
        .bind(work_date)
        .bind(exclude_entry)
        .fetch_one(executor)
        .await
    }

    /// Sum of hours logged by `email` in the week at `week_start`, with the
    /// same exclusion rule as [`Self::daily_hours`].
    pub async fn weekly_hours(
        executor: impl PgExecutor<'_>,
        email: &str,
        week_start: NaiveDate,
        exclude_entry: Option<Uuid>,
    ) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(hours), 0)
             FROM timesheet_entries
             WHERE email = $1
               AND week_start = $2
               AND ($3::uuid IS NULL OR entry_id <> $3)",
        )
        .bind(email)
        .bind(week_start)
        .bind(exclude_entry)
        .fetch_one(executor)
        .await
    }

    /// Update an entry's mutable fields, stamping `updated_at`.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        entry_id: Uuid,
        changes: &UpdateEntry,
    ) -> Result<TimesheetEntry, sqlx::Error> {
        let query = format!(
            "UPDATE timesheet_entries
             SET hours = $2, project = $3, description = $4, work_type = $5,
                 updated_at = now()
             WHERE entry_id = $1
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, TimesheetEntry>(&query)
            .bind(entry_id)
            .bind(changes.hours)
            .bind(&changes.project)
            .bind(&changes.description)
            .bind(&changes.work_type)
            .fetch_one(executor)
            .await
    }

    /// Delete an entry. Returns the number of rows removed (0 or 1).
    pub async fn delete(
        executor: impl PgExecutor<'_>,
        entry_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timesheet_entries WHERE entry_id = $1")
            .bind(entry_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Flip every entry of `(email, week_start)` currently in one of `from`
    /// to `to`, stamping `updated_at`. Returns the number of entries moved.
    pub async fn set_week_status(
        executor: impl PgExecutor<'_>,
        email: &str,
        week_start: NaiveDate,
        from: &[TimesheetStatus],
        to: TimesheetStatus,
    ) -> Result<u64, sqlx::Error> {
        let from: Vec<String> = from
            .iter()
            .map(|status| status.as_str().to_string())
            .collect();
        let result = sqlx::query(
            "UPDATE timesheet_entries
             SET status = $4, updated_at = now()
             WHERE email = $1 AND week_start = $2 AND status = ANY($3)",
        )
        .bind(email)
        .bind(week_start)
        .bind(&from)
        .bind(to.as_str())
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Flip every entry of `(email, week_start)` to `to` regardless of its
    /// current status. Used by the admin processor's whole-week decision.
    pub async fn set_all_week_status(
        executor: impl PgExecutor<'_>,
        email: &str,
        week_start: NaiveDate,
        to: TimesheetStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE timesheet_entries
             SET status = $3, updated_at = now()
             WHERE email = $1 AND week_start = $2",
        )
        .bind(email)
        .bind(week_start)
        .bind(to.as_str())
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// List submitted entries across all owners, enriched with the owner's
    /// employee id for the administrator review list.
    pub async fn list_submitted(pool: &PgPool) -> Result<Vec<SubmittedEntry>, sqlx::Error> {
        sqlx::query_as::<_, SubmittedEntry>(
            "SELECT
                e.entry_id, e.email, e.week_start, e.work_date, e.hours,
                e.project, e.description, e.work_type, e.status,
                u.employee_id
             FROM timesheet_entries e
             LEFT JOIN users u ON u.email = e.email
             WHERE e.status = $1
             ORDER BY e.email ASC, e.week_start ASC, e.work_date ASC",
        )
        .bind(TimesheetStatus::Submitted.as_str())
        .fetch_all(pool)
        .await
    }

    /// Force every Draft entry whose week is `week_start` to Submitted,
    /// stamping `updated_at`. Returns `(entry_id, email)` per moved entry.
    ///
    /// Single-statement, so the sweep is all-or-nothing per run.
    pub async fn auto_submit_week(
        executor: impl PgExecutor<'_>,
        week_start: NaiveDate,
    ) -> Result<Vec<(Uuid, String)>, sqlx::Error> {
        sqlx::query_as::<_, (Uuid, String)>(
            "UPDATE timesheet_entries
             SET status = $3, updated_at = now()
             WHERE status = $2 AND week_start = $1
             RETURNING entry_id, email",
        )
        .bind(week_start)
        .bind(TimesheetStatus::Draft.as_str())
        .bind(TimesheetStatus::Submitted.as_str())
        .fetch_all(executor)
        .await
    }
}
