//! Domain error taxonomy.
//!
//! [`ValidationError`] and [`WorkflowError`] are recoverable rejections the
//! caller surfaces verbatim to the user; both fold into [`CoreError`], which
//! the API layer maps onto HTTP statuses. Store-level failures are not part
//! of this taxonomy — they stay as `sqlx::Error` and are wrapped at the API
//! boundary.

use chrono::NaiveDate;

use crate::status::TimesheetStatus;

/// Rejection from the cumulative-hours validation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Accepting the proposed hours would push the day past the daily cap.
    #[error(
        "Daily limit exceeded. You have already logged {logged} hrs for {date}. \
         Remaining: {remaining} hrs."
    )]
    DailyLimitExceeded {
        date: NaiveDate,
        logged: f64,
        remaining: f64,
    },

    /// Accepting the proposed hours would push the week past the weekly cap.
    #[error(
        "Weekly limit exceeded. You have already logged {logged} hrs this week. \
         Remaining: {remaining} hrs."
    )]
    WeeklyLimitExceeded { logged: f64, remaining: f64 },

    /// Billable entries must carry a project and a task description.
    #[error("Project and task description are required for billable entries")]
    MissingProject,

    /// Hours outside the per-entry range.
    #[error("Invalid hours {hours}: must be between 0 and {max}")]
    InvalidHours { hours: f64, max: f64 },
}

/// Rejection from the week workflow state machine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    /// The entry's week has been submitted or approved; owner mutation is
    /// barred until an administrator denies the week.
    #[error("Entry is {0} and cannot be modified")]
    Locked(TimesheetStatus),

    /// `submit_week` found no Draft or Denied entries for the target week.
    #[error("No draft entries found to submit")]
    NothingToSubmit,

    /// The admin processor found no entries at all for the target week.
    #[error("No entries found for this week")]
    NoEntriesFound,

    /// Denying a week requires a non-empty rejection reason.
    #[error("A rejection reason is required when denying a week")]
    InvalidReason,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
