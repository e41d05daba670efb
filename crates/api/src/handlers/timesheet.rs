//! Handlers for the `/timesheets` resource (owner-side operations).
//!
//! Every operation acts on the authenticated user's own entries; the owner
//! identity always comes from the token, never from the request body. The
//! rolling 5-week selection window is enforced here, at the edge, so the
//! engine itself stays usable for historical weeks (the auto-submit sweep
//! relies on that).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use punchcard_core::period;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::timesheet::{EntryChanges, NewEntry};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /timesheets/current`.
#[derive(Debug, Deserialize)]
pub struct CurrentWeekQuery {
    /// Week to view; defaults to the current week.
    pub week_start: Option<NaiveDate>,
}

/// Response body for `GET /timesheets/current`.
#[derive(Debug, Serialize)]
pub struct WeekResponse<T: Serialize> {
    pub week_start: NaiveDate,
    pub entries: Vec<T>,
}

/// Request body for `POST /timesheets/entries`.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub work_date: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_work_type")]
    pub work_type: String,
}

/// Request body for `PUT /timesheets/entries/{entry_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub hours: f64,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub description: String,
    pub work_type: String,
}

/// Request body for `POST /timesheets/submit`.
#[derive(Debug, Deserialize)]
pub struct SubmitWeekRequest {
    pub week_start: NaiveDate,
}

fn default_work_type() -> String {
    "Billable".to_string()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/timesheets/current
///
/// The authenticated user's entries for a week (default: current week),
/// date-ascending.
pub async fn get_current(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<CurrentWeekQuery>,
) -> AppResult<impl IntoResponse> {
    let week_start = query
        .week_start
        .unwrap_or_else(|| period::current_week_start(Utc::now().date_naive()));

    let entries = state.engine.list_week(&auth.email, week_start).await?;
    Ok(Json(WeekResponse {
        week_start,
        entries,
    }))
}

/// GET /api/v1/timesheets/periods
///
/// The selectable week starts (current week plus four prior), newest first.
pub async fn list_periods(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    let periods = period::available_periods(Utc::now().date_naive());
    Ok(Json(DataResponse { data: periods }))
}

/// POST /api/v1/timesheets/entries
///
/// Log hours for one day. The week is derived from the work date and must
/// fall inside the rolling selection window.
pub async fn create_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEntryRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_selectable(input.work_date)?;

    let entry = state
        .engine
        .create_entry(NewEntry {
            email: auth.email,
            work_date: input.work_date,
            hours: input.hours,
            project: input.project,
            description: input.description,
            work_type: input.work_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/timesheets/entries/{entry_id}
///
/// Update an entry's hours, project, description, or work type. Rejected
/// with 409 once the entry's week is Submitted or Approved.
pub async fn update_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Json(input): Json<UpdateEntryRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .engine
        .update_entry(
            entry_id,
            &auth.email,
            EntryChanges {
                hours: input.hours,
                project: input.project,
                description: input.description,
                work_type: input.work_type,
            },
        )
        .await?;

    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/timesheets/entries/{entry_id}
///
/// Delete an entry, subject to the same lockdown rule as updates.
pub async fn delete_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    state.engine.delete_entry(entry_id, &auth.email).await?;
    Ok(Json(MessageResponse {
        message: "Entry deleted".to_string(),
    }))
}

/// POST /api/v1/timesheets/submit
///
/// Submit the week's Draft/Denied entries for administrator review.
pub async fn submit_week(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitWeekRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .engine
        .submit_week(&auth.email, input.week_start)
        .await?;
    Ok(Json(MessageResponse {
        message: "Week submitted successfully".to_string(),
    }))
}

/// Reject work dates whose week lies outside the rolling selection window.
fn ensure_selectable(work_date: NaiveDate) -> AppResult<()> {
    let today = Utc::now().date_naive();
    let week_start = period::week_start_for(work_date);
    if !period::is_selectable(today, week_start) {
        return Err(AppError::BadRequest(format!(
            "Date {work_date} is outside the selectable period window \
             (current week plus {} prior weeks)",
            period::AVAILABLE_PERIOD_COUNT - 1
        )));
    }
    Ok(())
}
