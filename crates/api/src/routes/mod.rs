pub mod admin;
pub mod auth;
pub mod health;
pub mod timesheet;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
///
/// /timesheets/current                  the caller's week (auth required)
/// /timesheets/periods                  selectable week starts
/// /timesheets/entries                  create entry (POST)
/// /timesheets/entries/{entry_id}       update (PUT), delete (DELETE)
/// /timesheets/submit                   submit week (POST)
///
/// /admin/submissions                   review queue (admin only)
/// /admin/timesheets/process            approve/deny a week (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/timesheets", timesheet::router())
        .nest("/admin", admin::router())
}
