//! Outbound notifications to employees.

pub mod mailer;
