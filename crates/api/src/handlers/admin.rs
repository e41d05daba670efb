//! Handlers for the `/admin` resource (administrator-side operations).

use axum::extract::State;
use axum::Json;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use punchcard_core::status::AdminAction;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/timesheets/process`.
#[derive(Debug, Deserialize)]
pub struct ProcessWeekRequest {
    /// Owner of the week being decided.
    pub email: String,
    pub week_start: NaiveDate,
    /// `"Approve"` or `"Deny"`.
    pub action: String,
    /// Mandatory when denying.
    #[serde(default)]
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/submissions
///
/// Submitted entries across all owners, enriched with employee ids.
pub async fn list_submissions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let submissions = state.processor.list_submitted().await?;
    Ok(Json(DataResponse { data: submissions }))
}

/// POST /api/v1/admin/timesheets/process
///
/// Approve or deny one owner's week. The admin identity recorded on the
/// decision comes from the token.
pub async fn process_week(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ProcessWeekRequest>,
) -> AppResult<impl IntoResponse> {
    let action: AdminAction = input.action.parse().map_err(AppError::BadRequest)?;

    let message = state
        .processor
        .process_week(
            &input.email,
            input.week_start,
            action,
            &admin.email,
            &input.reason,
        )
        .await?;

    Ok(Json(MessageResponse { message }))
}
