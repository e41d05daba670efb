//! Timesheet entry models.

use chrono::NaiveDate;
use punchcard_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `timesheet_entries` table: one logged work segment.
///
/// `entry_id`, `email`, `week_start`, and `work_date` are immutable after
/// creation; `updated_at` is refreshed on every mutation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimesheetEntry {
    pub entry_id: Uuid,
    pub email: String,
    pub week_start: NaiveDate,
    pub work_date: NaiveDate,
    pub hours: f64,
    pub project: String,
    pub description: String,
    pub work_type: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new entry.
#[derive(Debug, Clone)]
pub struct CreateEntry {
    pub entry_id: Uuid,
    pub email: String,
    pub week_start: NaiveDate,
    pub work_date: NaiveDate,
    pub hours: f64,
    pub project: String,
    pub description: String,
    pub work_type: String,
    pub status: String,
}

/// Mutable fields of an entry; everything else is fixed at creation.
#[derive(Debug, Clone)]
pub struct UpdateEntry {
    pub hours: f64,
    pub project: String,
    pub description: String,
    pub work_type: String,
}

/// A submitted entry enriched with the owner's employee id, as shown in the
/// administrator review list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmittedEntry {
    pub entry_id: Uuid,
    pub email: String,
    pub week_start: NaiveDate,
    pub work_date: NaiveDate,
    pub hours: f64,
    pub project: String,
    pub description: String,
    pub work_type: String,
    pub status: String,
    pub employee_id: Option<String>,
}
