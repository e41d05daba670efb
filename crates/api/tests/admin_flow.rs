//! HTTP-level integration tests for the `/admin` endpoints.
//!
//! Covers the whole-week decision workflow: review queue, approval with its
//! immutable record, denial with unlock-and-resubmit, and role enforcement.

mod common;

use axum::http::StatusCode;
use chrono::{Days, NaiveDate, Utc};
use common::{body_json, build_test_app, get, post_json, put_json, seed_user, token_for};
use punchcard_core::period;
use punchcard_db::repositories::ApprovalRepo;
use serde_json::json;
use sqlx::PgPool;

const ADA: &str = "ada@example.com";
const BOSS: &str = "boss@example.com";

fn this_monday() -> NaiveDate {
    period::current_week_start(Utc::now().date_naive())
}

fn day(offset: u64) -> NaiveDate {
    this_monday() + Days::new(offset)
}

fn entry_body(work_date: NaiveDate, hours: f64) -> serde_json::Value {
    json!({
        "work_date": work_date,
        "hours": hours,
        "project": "Apollo",
        "description": "Implementation work",
        "work_type": "Billable",
    })
}

/// Log `hours_per_day` for Monday..=`days` and submit the week.
async fn submit_filled_week(app: &axum::Router, token: &str, days: u64, hours_per_day: f64) {
    for offset in 0..days {
        let response = post_json(
            app.clone(),
            "/api/v1/timesheets/entries",
            Some(token),
            entry_body(day(offset), hours_per_day),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let response = post_json(
        app.clone(),
        "/api/v1/timesheets/submit",
        Some(token),
        json!({ "week_start": this_monday() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: approval writes one record and locks the week for good
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_week_creates_record_and_locks_entries(pool: PgPool) {
    seed_user(&pool, ADA, "Employee", Some("EMP-042")).await;
    seed_user(&pool, BOSS, "Admin", None).await;
    let app = build_test_app(pool.clone());
    let ada_token = token_for(ADA, "Employee");
    let boss_token = token_for(BOSS, "Admin");

    submit_filled_week(&app, &ada_token, 5, 8.0).await;

    // The review queue shows the submitted entries with the employee id.
    let response = get(app.clone(), "/api/v1/admin/submissions", Some(&boss_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let submissions = body["data"].as_array().expect("submissions array");
    assert_eq!(submissions.len(), 5);
    assert!(submissions
        .iter()
        .all(|s| s["email"] == ADA && s["employee_id"] == "EMP-042"));

    // Approve the week.
    let response = post_json(
        app.clone(),
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        json!({
            "email": ADA,
            "week_start": this_monday(),
            "action": "Approve",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Week approved");

    // Exactly one approval record, carrying the week's 40 hours.
    let count = ApprovalRepo::count_approvals(&pool, ADA, this_monday())
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
    let record = ApprovalRepo::find_approval(&pool, ADA, this_monday())
        .await
        .expect("find should succeed")
        .expect("record should exist");
    assert_eq!(record.total_hours, 40.0);
    assert_eq!(record.approved_by, BOSS);

    // Every entry is Approved, and the review queue is drained.
    let response = get(
        app.clone(),
        &format!("/api/v1/timesheets/current?week_start={}", this_monday()),
        Some(&ada_token),
    )
    .await;
    let body = body_json(response).await;
    let entries = body["entries"].as_array().expect("entries array");
    assert!(entries.iter().all(|e| e["status"] == "Approved"));

    let response = get(app.clone(), "/api/v1/admin/submissions", Some(&boss_token)).await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().expect("array").len(), 0);

    // Approved is terminal for the owner: no edits.
    let entry_id = entries[0]["entry_id"].as_str().expect("entry_id").to_string();
    let response = put_json(
        app,
        &format!("/api/v1/timesheets/entries/{entry_id}"),
        Some(&ada_token),
        json!({
            "hours": 1.0,
            "project": "Apollo",
            "description": "Implementation work",
            "work_type": "Billable",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: approval is terminal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_approved_week_cannot_be_decided_again(pool: PgPool) {
    seed_user(&pool, ADA, "Employee", None).await;
    seed_user(&pool, BOSS, "Admin", None).await;
    let app = build_test_app(pool);
    let ada_token = token_for(ADA, "Employee");
    let boss_token = token_for(BOSS, "Admin");

    submit_filled_week(&app, &ada_token, 1, 4.0).await;

    let approve = json!({
        "email": ADA,
        "week_start": this_monday(),
        "action": "Approve",
    });
    let response = post_json(
        app.clone(),
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        approve.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Neither a second approval nor a late denial can move the week.
    let response = post_json(
        app.clone(),
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        approve,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json(
        app,
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        json!({
            "email": ADA,
            "week_start": this_monday(),
            "action": "Deny",
            "reason": "second thoughts",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: denial requires a reason
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deny_with_empty_reason_rejected(pool: PgPool) {
    seed_user(&pool, ADA, "Employee", None).await;
    seed_user(&pool, BOSS, "Admin", None).await;
    let app = build_test_app(pool);
    let ada_token = token_for(ADA, "Employee");
    let boss_token = token_for(BOSS, "Admin");

    submit_filled_week(&app, &ada_token, 1, 4.0).await;

    let response = post_json(
        app,
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        json!({
            "email": ADA,
            "week_start": this_monday(),
            "action": "Deny",
            "reason": "   ",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "WORKFLOW_ERROR");
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("reason is required"));
}

// ---------------------------------------------------------------------------
// Test: denial unlocks the week for correction and resubmission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deny_unlocks_entries_for_resubmission(pool: PgPool) {
    seed_user(&pool, ADA, "Employee", None).await;
    seed_user(&pool, BOSS, "Admin", None).await;
    let app = build_test_app(pool.clone());
    let ada_token = token_for(ADA, "Employee");
    let boss_token = token_for(BOSS, "Admin");

    submit_filled_week(&app, &ada_token, 1, 4.0).await;

    let response = post_json(
        app.clone(),
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        json!({
            "email": ADA,
            "week_start": this_monday(),
            "action": "Deny",
            "reason": "Monday hours look wrong",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Week denied");

    // One denial record with the reason.
    let count = ApprovalRepo::count_denials(&pool, ADA, this_monday())
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
    let record = ApprovalRepo::find_denial(&pool, ADA, this_monday())
        .await
        .expect("find should succeed")
        .expect("record should exist");
    assert_eq!(record.rejection_reason, "Monday hours look wrong");
    assert_eq!(record.denied_by, BOSS);

    // The entries are Denied but editable again.
    let response = get(
        app.clone(),
        &format!("/api/v1/timesheets/current?week_start={}", this_monday()),
        Some(&ada_token),
    )
    .await;
    let body = body_json(response).await;
    let entries = body["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "Denied");

    let entry_id = entries[0]["entry_id"].as_str().expect("entry_id").to_string();
    let response = put_json(
        app.clone(),
        &format!("/api/v1/timesheets/entries/{entry_id}"),
        Some(&ada_token),
        json!({
            "hours": 6.0,
            "project": "Apollo",
            "description": "Corrected after feedback",
            "work_type": "Billable",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Resubmitting picks the Denied entry back up.
    let response = post_json(
        app.clone(),
        "/api/v1/timesheets/submit",
        Some(&ada_token),
        json!({ "week_start": this_monday() }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        app,
        &format!("/api/v1/timesheets/current?week_start={}", this_monday()),
        Some(&ada_token),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["entries"][0]["status"], "Submitted");
}

// ---------------------------------------------------------------------------
// Test: processing a week with no entries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_process_week_without_entries_fails(pool: PgPool) {
    seed_user(&pool, ADA, "Employee", None).await;
    seed_user(&pool, BOSS, "Admin", None).await;
    let app = build_test_app(pool);
    let boss_token = token_for(BOSS, "Admin");

    let response = post_json(
        app,
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        json!({
            "email": ADA,
            "week_start": this_monday(),
            "action": "Approve",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No entries found for this week");
}

// ---------------------------------------------------------------------------
// Test: unknown action
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_action_rejected(pool: PgPool) {
    seed_user(&pool, BOSS, "Admin", None).await;
    let app = build_test_app(pool);
    let boss_token = token_for(BOSS, "Admin");

    let response = post_json(
        app,
        "/api/v1/admin/timesheets/process",
        Some(&boss_token),
        json!({
            "email": ADA,
            "week_start": this_monday(),
            "action": "Escalate",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: role enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_require_admin_role(pool: PgPool) {
    seed_user(&pool, ADA, "Employee", None).await;
    let app = build_test_app(pool);
    let ada_token = token_for(ADA, "Employee");

    let response = get(app.clone(), "/api/v1/admin/submissions", Some(&ada_token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        app.clone(),
        "/api/v1/admin/timesheets/process",
        Some(&ada_token),
        json!({
            "email": ADA,
            "week_start": this_monday(),
            "action": "Approve",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(app, "/api/v1/admin/submissions", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
