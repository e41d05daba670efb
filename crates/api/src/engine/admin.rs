//! Administrator-side week processing.
//!
//! A decision applies to the whole week at once: one immutable record, one
//! status flip across every entry, one notification. The processor acquires
//! the same per-`(owner, week_start)` lock as the owner-side engine, so an
//! admin decision and an owner edit always take a definite order instead of
//! leaving the week in a mixed-status state.

use std::sync::Arc;

use chrono::NaiveDate;
use punchcard_core::error::WorkflowError;
use punchcard_core::status::{AdminAction, TimesheetStatus};
use punchcard_db::models::approval::{CreateWeekApproval, CreateWeekDenial};
use punchcard_db::models::entry::SubmittedEntry;
use punchcard_db::repositories::{ApprovalRepo, EntryRepo};
use punchcard_db::DbPool;
use uuid::Uuid;

use super::locks::WeekLocks;
use crate::error::AppResult;
use crate::notifications::mailer::StatusNotifier;

/// Applies administrator decisions to submitted weeks.
pub struct AdminProcessor {
    pool: DbPool,
    locks: Arc<WeekLocks>,
    notifier: Arc<StatusNotifier>,
}

impl AdminProcessor {
    pub fn new(pool: DbPool, locks: Arc<WeekLocks>, notifier: Arc<StatusNotifier>) -> Self {
        Self {
            pool,
            locks,
            notifier,
        }
    }

    /// List submitted entries across all owners for the review queue.
    pub async fn list_submitted(&self) -> AppResult<Vec<SubmittedEntry>> {
        Ok(EntryRepo::list_submitted(&self.pool).await?)
    }

    /// Apply an approve/deny decision to one owner's week.
    ///
    /// Writes exactly one approval or denial record, flips every entry of
    /// the week to the resulting status, and notifies the owner. The
    /// notification is fire-and-forget: a delivery failure is logged inside
    /// the spawned task and never rolls back the decision.
    ///
    /// The processor only requires that entries exist for the week; it does
    /// not insist they are currently Submitted (it logs a warning instead).
    /// The one hard rule is that Approved is terminal: an already-approved
    /// week cannot be decided again.
    pub async fn process_week(
        &self,
        email: &str,
        week_start: NaiveDate,
        action: AdminAction,
        admin_email: &str,
        reason: &str,
    ) -> AppResult<String> {
        if action == AdminAction::Deny && reason.trim().is_empty() {
            return Err(WorkflowError::InvalidReason.into());
        }

        let _guard = self.locks.acquire(email, week_start).await;
        let mut tx = self.pool.begin().await?;

        let entries = EntryRepo::list_week_for_update(&mut *tx, email, week_start).await?;
        if entries.is_empty() {
            return Err(WorkflowError::NoEntriesFound.into());
        }

        if entries
            .iter()
            .any(|e| e.status == TimesheetStatus::Approved.as_str())
        {
            return Err(WorkflowError::Locked(TimesheetStatus::Approved).into());
        }

        let unsubmitted = entries
            .iter()
            .filter(|e| e.status != TimesheetStatus::Submitted.as_str())
            .count();
        if unsubmitted > 0 {
            tracing::warn!(
                email = %email,
                week_start = %week_start,
                unsubmitted,
                "Processing a week with entries not currently submitted"
            );
        }

        let total_hours: f64 = entries.iter().map(|e| e.hours).sum();

        match action {
            AdminAction::Approve => {
                ApprovalRepo::insert_approval(
                    &mut *tx,
                    &CreateWeekApproval {
                        id: Uuid::new_v4(),
                        email: email.to_string(),
                        week_start,
                        total_hours,
                        approved_by: admin_email.to_string(),
                    },
                )
                .await?;
            }
            AdminAction::Deny => {
                ApprovalRepo::insert_denial(
                    &mut *tx,
                    &CreateWeekDenial {
                        id: Uuid::new_v4(),
                        email: email.to_string(),
                        week_start,
                        rejection_reason: reason.to_string(),
                        denied_by: admin_email.to_string(),
                    },
                )
                .await?;
            }
        }

        EntryRepo::set_all_week_status(&mut *tx, email, week_start, action.resulting_status())
            .await?;
        tx.commit().await?;

        tracing::info!(
            email = %email,
            week_start = %week_start,
            action = %action,
            admin = %admin_email,
            total_hours,
            "Week processed"
        );

        self.notifier
            .notify_status(email, week_start, action, reason);

        Ok(match action {
            AdminAction::Approve => "Week approved".to_string(),
            AdminAction::Deny => "Week denied".to_string(),
        })
    }
}
