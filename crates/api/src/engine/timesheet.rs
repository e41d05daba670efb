//! Owner-side entry operations.
//!
//! Every mutation runs the same shape: resolve the `(owner, week_start)`
//! key, take its lock, open a transaction, re-check workflow legality and
//! cumulative caps against current store state, then persist. The lock is
//! what makes the check-then-act sequence safe against concurrent entries
//! for the same owner and week; the transaction is what makes the persist
//! atomic.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use punchcard_core::error::{CoreError, ValidationError, WorkflowError};
use punchcard_core::limits::{self, HOLIDAY_HOURS};
use punchcard_core::period;
use punchcard_core::status::{TimesheetStatus, WorkType};
use punchcard_db::models::entry::{CreateEntry, TimesheetEntry, UpdateEntry};
use punchcard_db::repositories::EntryRepo;
use punchcard_db::DbPool;
use uuid::Uuid;

use super::locks::WeekLocks;
use crate::error::{AppError, AppResult};

/// Input for creating a new entry. The week is derived from `work_date`,
/// never taken from the caller.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub email: String,
    pub work_date: NaiveDate,
    pub hours: f64,
    pub project: String,
    pub description: String,
    pub work_type: String,
}

/// Input for updating an existing entry's mutable fields.
#[derive(Debug, Clone)]
pub struct EntryChanges {
    pub hours: f64,
    pub project: String,
    pub description: String,
    pub work_type: String,
}

/// Owner-side entry engine: validation, workflow gating, and persistence.
pub struct TimesheetEngine {
    pool: DbPool,
    locks: Arc<WeekLocks>,
}

impl TimesheetEngine {
    pub fn new(pool: DbPool, locks: Arc<WeekLocks>) -> Self {
        Self { pool, locks }
    }

    /// Create a new Draft entry after cumulative validation.
    pub async fn create_entry(&self, input: NewEntry) -> AppResult<TimesheetEntry> {
        let (work_type, hours) =
            normalize_input(&input.work_type, input.hours, &input.project, &input.description)?;
        let week_start = period::week_start_for(input.work_date);

        let _guard = self.locks.acquire(&input.email, week_start).await;
        let mut tx = self.pool.begin().await?;

        let daily =
            EntryRepo::daily_hours(&mut *tx, &input.email, input.work_date, None).await?;
        limits::check_daily(input.work_date, daily, hours)?;

        let weekly = EntryRepo::weekly_hours(&mut *tx, &input.email, week_start, None).await?;
        limits::check_weekly(weekly, hours)?;

        let created = EntryRepo::insert(
            &mut *tx,
            &CreateEntry {
                entry_id: Uuid::new_v4(),
                email: input.email.clone(),
                week_start,
                work_date: input.work_date,
                hours,
                project: input.project,
                description: input.description,
                work_type: work_type.as_str().to_string(),
                status: TimesheetStatus::Draft.as_str().to_string(),
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            email = %created.email,
            entry_id = %created.entry_id,
            work_date = %created.work_date,
            hours = created.hours,
            "Entry created"
        );
        Ok(created)
    }

    /// Update an entry's mutable fields after re-running cumulative
    /// validation with the entry excluded from its own totals.
    pub async fn update_entry(
        &self,
        entry_id: Uuid,
        email: &str,
        changes: EntryChanges,
    ) -> AppResult<TimesheetEntry> {
        let (work_type, hours) = normalize_input(
            &changes.work_type,
            changes.hours,
            &changes.project,
            &changes.description,
        )?;

        // The owner and week are immutable, so the lock key can be resolved
        // before taking the lock.
        let existing = self.find_owned(entry_id, email).await?;

        let _guard = self.locks.acquire(email, existing.week_start).await;
        let mut tx = self.pool.begin().await?;

        // Re-read under the lock: a submit or an admin decision may have
        // flipped the status since the first read.
        let current = EntryRepo::find_by_id(&mut *tx, entry_id)
            .await?
            .ok_or_else(|| entry_not_found(entry_id))?;
        ensure_editable(&current)?;

        let daily =
            EntryRepo::daily_hours(&mut *tx, email, current.work_date, Some(entry_id)).await?;
        limits::check_daily(current.work_date, daily, hours)?;

        let weekly =
            EntryRepo::weekly_hours(&mut *tx, email, current.week_start, Some(entry_id)).await?;
        limits::check_weekly(weekly, hours)?;

        let updated = EntryRepo::update(
            &mut *tx,
            entry_id,
            &UpdateEntry {
                hours,
                project: changes.project,
                description: changes.description,
                work_type: work_type.as_str().to_string(),
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            email = %email,
            entry_id = %entry_id,
            hours = updated.hours,
            "Entry updated"
        );
        Ok(updated)
    }

    /// Delete an entry, subject to the same lockdown rule as updates.
    pub async fn delete_entry(&self, entry_id: Uuid, email: &str) -> AppResult<()> {
        let existing = self.find_owned(entry_id, email).await?;

        let _guard = self.locks.acquire(email, existing.week_start).await;
        let mut tx = self.pool.begin().await?;

        let current = EntryRepo::find_by_id(&mut *tx, entry_id)
            .await?
            .ok_or_else(|| entry_not_found(entry_id))?;
        ensure_editable(&current)?;

        EntryRepo::delete(&mut *tx, entry_id).await?;
        tx.commit().await?;

        tracing::info!(email = %email, entry_id = %entry_id, "Entry deleted");
        Ok(())
    }

    /// Move every Draft or Denied entry of the week to Submitted.
    ///
    /// Returns the number of entries moved; fails with `NothingToSubmit`
    /// when no entry is in a submittable state.
    pub async fn submit_week(&self, email: &str, week_start: NaiveDate) -> AppResult<u64> {
        let _guard = self.locks.acquire(email, week_start).await;
        let mut tx = self.pool.begin().await?;

        let moved = EntryRepo::set_week_status(
            &mut *tx,
            email,
            week_start,
            &[TimesheetStatus::Draft, TimesheetStatus::Denied],
            TimesheetStatus::Submitted,
        )
        .await?;
        if moved == 0 {
            return Err(WorkflowError::NothingToSubmit.into());
        }
        tx.commit().await?;

        tracing::info!(email = %email, week_start = %week_start, moved, "Week submitted");
        Ok(moved)
    }

    /// List one owner's entries for a week, date-ascending.
    pub async fn list_week(
        &self,
        email: &str,
        week_start: NaiveDate,
    ) -> AppResult<Vec<TimesheetEntry>> {
        Ok(EntryRepo::list_week(&self.pool, email, week_start).await?)
    }

    /// Fetch an entry and verify it belongs to `email`.
    async fn find_owned(&self, entry_id: Uuid, email: &str) -> AppResult<TimesheetEntry> {
        let entry = EntryRepo::find_by_id(&self.pool, entry_id)
            .await?
            .ok_or_else(|| entry_not_found(entry_id))?;
        if entry.email != email {
            return Err(AppError::Core(CoreError::Forbidden(
                "Entry does not belong to the authenticated user".into(),
            )));
        }
        Ok(entry)
    }
}

/// Parse and normalize the caller-supplied fields.
///
/// Holiday entries carry fixed hours and need no project/description;
/// Billable entries get the per-entry hours range check and must name a
/// project and a task description.
fn normalize_input(
    work_type: &str,
    hours: f64,
    project: &str,
    description: &str,
) -> AppResult<(WorkType, f64)> {
    let work_type = WorkType::from_str(work_type).map_err(AppError::BadRequest)?;
    let hours = match work_type {
        WorkType::Holiday => HOLIDAY_HOURS,
        WorkType::Billable => {
            limits::validate_entry_hours(hours)?;
            if project.trim().is_empty() || description.trim().is_empty() {
                return Err(ValidationError::MissingProject.into());
            }
            hours
        }
    };
    Ok((work_type, hours))
}

/// Reject the mutation unless the entry's current status permits it.
fn ensure_editable(entry: &TimesheetEntry) -> AppResult<()> {
    let status = TimesheetStatus::from_str(&entry.status)
        .map_err(|e| AppError::Core(CoreError::Internal(e)))?;
    if status.is_locked() {
        return Err(WorkflowError::Locked(status).into());
    }
    Ok(())
}

fn entry_not_found(entry_id: Uuid) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "TimesheetEntry",
        id: entry_id.to_string(),
    })
}
