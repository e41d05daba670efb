//! The timesheet entry engine.
//!
//! [`timesheet`] carries the owner-side operations (create/update/delete
//! entries, submit a week), [`admin`] the administrator-side week decisions,
//! and [`locks`] the per-`(owner, week_start)` serialization both sides
//! acquire before any check-then-act sequence against the store.

pub mod admin;
pub mod locks;
pub mod timesheet;
