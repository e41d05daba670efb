//! Route definitions for administrator operations.
//!
//! ```text
//! GET    /submissions            list_submissions
//! POST   /timesheets/process     process_week
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submissions", get(admin::list_submissions))
        .route("/timesheets/process", post(admin::process_week))
}
