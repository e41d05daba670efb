//! Route definitions for owner-side timesheet operations.
//!
//! ```text
//! GET    /current               get_current
//! GET    /periods               list_periods
//! POST   /entries               create_entry
//! PUT    /entries/{entry_id}    update_entry
//! DELETE /entries/{entry_id}    delete_entry
//! POST   /submit                submit_week
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::timesheet;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(timesheet::get_current))
        .route("/periods", get(timesheet::list_periods))
        .route("/entries", post(timesheet::create_entry))
        .route(
            "/entries/{entry_id}",
            put(timesheet::update_entry).delete(timesheet::delete_entry),
        )
        .route("/submit", post(timesheet::submit_week))
}
