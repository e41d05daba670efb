//! Week approval and denial records.
//!
//! Written by the admin processor when a week is decided; never updated
//! afterwards. A week that is denied, corrected, and decided again gets a
//! fresh record per decision, so the tables double as a decision history.

use chrono::NaiveDate;
use punchcard_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `week_approvals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeekApproval {
    pub id: Uuid,
    pub email: String,
    pub week_start: NaiveDate,
    /// Sum of the week's entry hours at approval time.
    pub total_hours: f64,
    pub approved_by: String,
    pub approved_at: Timestamp,
}

/// A row from the `week_denials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeekDenial {
    pub id: Uuid,
    pub email: String,
    pub week_start: NaiveDate,
    pub rejection_reason: String,
    pub denied_by: String,
    pub denied_at: Timestamp,
}

/// DTO for recording an approval.
#[derive(Debug, Clone)]
pub struct CreateWeekApproval {
    pub id: Uuid,
    pub email: String,
    pub week_start: NaiveDate,
    pub total_hours: f64,
    pub approved_by: String,
}

/// DTO for recording a denial.
#[derive(Debug, Clone)]
pub struct CreateWeekDenial {
    pub id: Uuid,
    pub email: String,
    pub week_start: NaiveDate,
    pub rejection_reason: String,
    pub denied_by: String,
}
