//! Weekly auto-submission of stale draft timesheets.
//!
//! Spawns a background loop that, once per week, force-moves every Draft
//! entry of the just-ended week to Submitted so employees cannot leave a
//! week dangling forever. The sweep writes no approval/denial records and
//! sends no notifications; those only arise from administrator action.
//!
//! Runs Sunday 04:00 UTC by default; both the weekday and the hour are
//! configuration values, not invariants.

use std::time::Duration;

use chrono::{DateTime, Datelike, Days, Utc, Weekday};
use punchcard_core::period;
use punchcard_db::repositories::EntryRepo;
use punchcard_db::DbPool;
use tokio_util::sync::CancellationToken;

/// Default run day.
const DEFAULT_RUN_WEEKDAY: Weekday = Weekday::Sun;

/// Default run hour (UTC).
const DEFAULT_RUN_HOUR: u32 = 4;

/// Run the auto-submit loop until `cancel` is triggered.
///
/// | Variable               | Default | Meaning                       |
/// |------------------------|---------|-------------------------------|
/// | `AUTO_SUBMIT_WEEKDAY`  | `sun`   | Day of week the sweep runs    |
/// | `AUTO_SUBMIT_HOUR_UTC` | `4`     | Hour of day (UTC) it runs at  |
pub async fn run(pool: DbPool, cancel: CancellationToken) {
    let weekday: Weekday = std::env::var("AUTO_SUBMIT_WEEKDAY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_RUN_WEEKDAY);

    let hour: u32 = std::env::var("AUTO_SUBMIT_HOUR_UTC")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|h| *h < 24)
        .unwrap_or(DEFAULT_RUN_HOUR);

    tracing::info!(weekday = %weekday, hour, "Auto-submit job started");

    loop {
        let wait = duration_until_next_run(Utc::now(), weekday, hour);
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Auto-submit job stopping");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                sweep(&pool).await;
            }
        }
    }
}

/// One sweep: submit every Draft entry of last week.
///
/// The flip is a single transactional statement, so a run is all-or-nothing;
/// a failed run is logged and retried at the next scheduled time.
async fn sweep(pool: &DbPool) {
    let last_week = period::current_week_start(Utc::now().date_naive()) - Days::new(7);

    match EntryRepo::auto_submit_week(pool, last_week).await {
        Ok(moved) if moved.is_empty() => {
            tracing::debug!(week_start = %last_week, "Auto-submit: no draft entries to move");
        }
        Ok(moved) => {
            for (entry_id, email) in &moved {
                tracing::debug!(entry_id = %entry_id, email = %email, "Auto-submitted entry");
            }
            tracing::info!(
                week_start = %last_week,
                count = moved.len(),
                "Auto-submit sweep completed"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, week_start = %last_week, "Auto-submit sweep failed");
        }
    }
}

/// Time until the next occurrence of `weekday` at `hour`:00 UTC, strictly in
/// the future.
fn duration_until_next_run(now: DateTime<Utc>, weekday: Weekday, hour: u32) -> Duration {
    let today = now.date_naive();
    let days_ahead = u64::from(
        (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7,
    );
    let mut candidate = (today + Days::new(days_ahead))
        .and_hms_opt(hour, 0, 0)
        .expect("hour is validated to be < 24")
        .and_utc();
    if candidate <= now {
        candidate += chrono::Duration::days(7);
    }
    (candidate - now).to_std().unwrap_or(Duration::ZERO)
}
