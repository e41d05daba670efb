//! User account model.

use punchcard_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table. The email doubles as the primary key and
/// as the owner identifier on timesheet entries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub full_name: String,
    pub employee_id: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub full_name: String,
    pub employee_id: Option<String>,
}
