//! Repository for the `week_approvals` and `week_denials` tables.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};

use crate::models::approval::{CreateWeekApproval, CreateWeekDenial, WeekApproval, WeekDenial};

/// Column list for week_approvals queries.
const APPROVAL_COLUMNS: &str = "id, email, week_start, total_hours, approved_by, approved_at";

/// Column list for week_denials queries.
const DENIAL_COLUMNS: &str = "id, email, week_start, rejection_reason, denied_by, denied_at";

/// Provides write-once record keeping for week decisions.
pub struct ApprovalRepo;

impl ApprovalRepo {
    /// Insert an approval record, returning the created row.
    pub async fn insert_approval(
        executor: impl PgExecutor<'_>,
        input: &CreateWeekApproval,
    ) -> Result<WeekApproval, sqlx::Error> {
        let query = format!(
            "INSERT INTO week_approvals (id, email, week_start, total_hours, approved_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {APPROVAL_COLUMNS}"
        );
        sqlx::query_as::<_, WeekApproval>(&query)
            .bind(input.id)
            .bind(&input.email)
            .bind(input.week_start)
            .bind(input.total_hours)
            .bind(&input.approved_by)
            .fetch_one(executor)
            .await
    }

    /// Insert a denial record, returning the created row.
    pub async fn insert_denial(
        executor: impl PgExecutor<'_>,
        input: &CreateWeekDenial,
    ) -> Result<WeekDenial, sqlx::Error> {
        let query = format!(
            "INSERT INTO week_denials (id, email, week_start, rejection_reason, denied_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {DENIAL_COLUMNS}"
        );
        sqlx::query_as::<_, WeekDenial>(&query)
            .bind(input.id)
            .bind(&input.email)
            .bind(input.week_start)
            .bind(&input.rejection_reason)
            .bind(&input.denied_by)
            .fetch_one(executor)
            .await
    }

    /// The most recent approval record for an owner's week, if any.
    pub async fn find_approval(
        pool: &PgPool,
        email: &str,
        week_start: NaiveDate,
    ) -> Result<Option<WeekApproval>, sqlx::Error> {
        let query = format!(
            "SELECT {APPROVAL_COLUMNS} FROM week_approvals
             WHERE email = $1 AND week_start = $2
             ORDER BY approved_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, WeekApproval>(&query)
            .bind(email)
            .bind(week_start)
            .fetch_optional(pool)
            .await
    }

    /// The most recent denial record for an owner's week, if any.
    pub async fn find_denial(
        pool: &PgPool,
        email: &str,
        week_start: NaiveDate,
    ) -> Result<Option<WeekDenial>, sqlx::Error> {
        let query = format!(
            "SELECT {DENIAL_COLUMNS} FROM week_denials
             WHERE email = $1 AND week_start = $2
             ORDER BY denied_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, WeekDenial>(&query)
            .bind(email)
            .bind(week_start)
            .fetch_optional(pool)
            .await
    }

    /// Number of approval records for an owner's week.
    pub async fn count_approvals(
        pool: &PgPool,
        email: &str,
        week_start: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM week_approvals WHERE email = $1 AND week_start = $2",
        )
        .bind(email)
        .bind(week_start)
        .fetch_one(pool)
        .await
    }

    /// Number of denial records for an owner's week.
    pub async fn count_denials(
        pool: &PgPool,
        email: &str,
        week_start: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM week_denials WHERE email = $1 AND week_start = $2",
        )
        .bind(email)
        .bind(week_start)
        .fetch_one(pool)
        .await
    }
}
