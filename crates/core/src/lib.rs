//! Domain logic for the timesheet platform.
//!
//! Pure types and rules with no I/O: status vocabulary and transition
//! predicates, week-period derivation, and the cumulative-hours limits the
//! entry engine enforces. The `db` and `api` crates depend on this crate;
//! nothing here depends on them.

pub mod error;
pub mod limits;
pub mod period;
pub mod roles;
pub mod status;
pub mod types;
