//! Workflow status vocabulary and transition rules.
//!
//! Every entry belonging to one `(owner, week_start)` pair carries the same
//! status; transitions are applied to the whole group at once. The
//! predicates here are the single source of truth for which mutations are
//! legal in which state — the engine and the store never hard-code status
//! strings.

use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a timesheet entry.
///
/// ```text
/// create ──> Draft ──submit──> Submitted ──approve──> Approved (terminal)
///              ^                   │
///              │                 deny(reason)
///              └──── editable ──── Denied ──submit──> Submitted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimesheetStatus {
    Draft,
    Submitted,
    Approved,
    Denied,
}

impl TimesheetStatus {
    /// The string form stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimesheetStatus::Draft => "Draft",
            TimesheetStatus::Submitted => "Submitted",
            TimesheetStatus::Approved => "Approved",
            TimesheetStatus::Denied => "Denied",
        }
    }

    /// Whether the owner may mutate or delete an entry in this state.
    ///
    /// Denied entries are editable again so the owner can correct and
    /// resubmit; the `Denied` label is retained for audit until then.
    pub fn is_editable(&self) -> bool {
        matches!(self, TimesheetStatus::Draft | TimesheetStatus::Denied)
    }

    /// Whether entries in this state are picked up by `submit_week`.
    pub fn is_submittable(&self) -> bool {
        matches!(self, TimesheetStatus::Draft | TimesheetStatus::Denied)
    }

    /// Whether the week-level lockdown applies (no owner mutation at all).
    pub fn is_locked(&self) -> bool {
        !self.is_editable()
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimesheetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(TimesheetStatus::Draft),
            "Submitted" => Ok(TimesheetStatus::Submitted),
            "Approved" => Ok(TimesheetStatus::Approved),
            "Denied" => Ok(TimesheetStatus::Denied),
            other => Err(format!("Unknown timesheet status '{other}'")),
        }
    }
}

/// Kind of work an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkType {
    Billable,
    Holiday,
}

impl WorkType {
    /// The string form stored in the `work_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Billable => "Billable",
            WorkType::Holiday => "Holiday",
        }
    }

    /// Holiday entries carry fixed hours and need no project/description.
    pub fn requires_project(&self) -> bool {
        matches!(self, WorkType::Billable)
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Billable" => Ok(WorkType::Billable),
            "Holiday" => Ok(WorkType::Holiday),
            other => Err(format!("Unknown work type '{other}'. Must be one of: Billable, Holiday")),
        }
    }
}

/// Decision an administrator applies to a whole submitted week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Approve,
    Deny,
}

impl AdminAction {
    /// The status every entry of the week moves to under this action.
    pub fn resulting_status(&self) -> TimesheetStatus {
        match self {
            AdminAction::Approve => TimesheetStatus::Approved,
            AdminAction::Deny => TimesheetStatus::Denied,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::Approve => "Approve",
            AdminAction::Deny => "Deny",
        }
    }
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approve" => Ok(AdminAction::Approve),
            "Deny" => Ok(AdminAction::Deny),
            other => Err(format!("Unknown action '{other}'. Must be one of: Approve, Deny")),
        }
    }
}
