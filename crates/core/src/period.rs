//! Week-period derivation.
//!
//! Timesheet weeks are anchored on Mondays. Employees may only log against
//! a rolling window of the current week plus the four preceding ones; the
//! request layer uses [`available_periods`] to bound which weeks a user may
//! select for entry or viewing.

use chrono::{Datelike, Days, NaiveDate};

/// Number of selectable periods: the current week and four preceding weeks.
pub const AVAILABLE_PERIOD_COUNT: usize = 5;

/// Days in one timesheet period.
pub const DAYS_PER_WEEK: u64 = 7;

/// The Monday anchoring the week that contains `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    let days_from_monday = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(days_from_monday)
}

/// The Monday of the week containing `today`.
pub fn current_week_start(today: NaiveDate) -> NaiveDate {
    week_start_for(today)
}

/// The Sunday closing the week anchored at `week_start`.
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Days::new(DAYS_PER_WEEK - 1)
}

/// Whether `date` falls inside the week anchored at `week_start`.
pub fn week_contains(week_start: NaiveDate, date: NaiveDate) -> bool {
    date >= week_start && date <= week_end(week_start)
}

/// The selectable week starts as of `today`, newest first.
///
/// Returns the current week start plus the four preceding week starts.
pub fn available_periods(today: NaiveDate) -> Vec<NaiveDate> {
    let current = current_week_start(today);
    (0..AVAILABLE_PERIOD_COUNT as u64)
        .map(|i| current - Days::new(i * DAYS_PER_WEEK))
        .collect()
}

/// Whether `week_start` is inside the rolling selection window as of `today`.
pub fn is_selectable(today: NaiveDate, week_start: NaiveDate) -> bool {
    available_periods(today).contains(&week_start)
}
