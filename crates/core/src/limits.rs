//! Cumulative-hours limits.
//!
//! The checks here are pure: the engine reads the current daily/weekly
//! totals from the store (excluding the entry being updated, so it does not
//! double-count against itself), then asks these functions whether the
//! proposed hours fit. Comparisons tolerate floating rounding via
//! [`HOURS_EPSILON`].

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Maximum hours an employee may log per calendar day.
pub const MAX_DAILY_HOURS: f64 = 8.0;

/// Maximum hours an employee may log per timesheet week.
pub const MAX_WEEKLY_HOURS: f64 = 40.0;

/// Fixed hours recorded for a Holiday entry.
pub const HOLIDAY_HOURS: f64 = 8.0;

/// Tolerance when comparing summed hours against the caps.
pub const HOURS_EPSILON: f64 = 0.01;

/// Capacity left under `cap` given `logged` hours, floored at zero.
pub fn remaining(cap: f64, logged: f64) -> f64 {
    (cap - logged).max(0.0)
}

/// Per-entry range check, applied before any store read.
///
/// A single entry can never exceed the daily cap, so hours above
/// [`MAX_DAILY_HOURS`] are rejected outright rather than deferred to the
/// cumulative check.
pub fn validate_entry_hours(hours: f64) -> Result<(), ValidationError> {
    if !hours.is_finite() || hours < 0.0 || hours > MAX_DAILY_HOURS + HOURS_EPSILON {
        return Err(ValidationError::InvalidHours {
            hours,
            max: MAX_DAILY_HOURS,
        });
    }
    Ok(())
}

/// Check the proposed hours against the daily cap.
///
/// `daily_total` is the sum of hours already logged by the owner on `date`,
/// excluding the entry under update if any.
pub fn check_daily(
    date: NaiveDate,
    daily_total: f64,
    proposed: f64,
) -> Result<(), ValidationError> {
    if daily_total + proposed > MAX_DAILY_HOURS + HOURS_EPSILON {
        return Err(ValidationError::DailyLimitExceeded {
            date,
            logged: daily_total,
            remaining: remaining(MAX_DAILY_HOURS, daily_total),
        });
    }
    Ok(())
}

/// Check the proposed hours against the weekly cap.
pub fn check_weekly(weekly_total: f64, proposed: f64) -> Result<(), ValidationError> {
    if weekly_total + proposed > MAX_WEEKLY_HOURS + HOURS_EPSILON {
        return Err(ValidationError::WeeklyLimitExceeded {
            logged: weekly_total,
            remaining: remaining(MAX_WEEKLY_HOURS, weekly_total),
        });
    }
    Ok(())
}
