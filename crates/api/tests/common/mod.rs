//! Shared harness for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so integration tests
//! exercise the same middleware stack (CORS, request ID, timeout, tracing,
//! panic recovery) that production uses, plus request/response helpers on
//! top of `tower::ServiceExt`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use punchcard_api::auth::jwt::{generate_access_token, JwtConfig};
use punchcard_api::config::ServerConfig;
use punchcard_api::engine::admin::AdminProcessor;
use punchcard_api::engine::locks::WeekLocks;
use punchcard_api::engine::timesheet::TimesheetEngine;
use punchcard_api::notifications::mailer::StatusNotifier;
use punchcard_api::routes;
use punchcard_api::state::AppState;
use punchcard_db::models::user::CreateUser;
use punchcard_db::repositories::UserRepo;

/// Signing secret shared by the test config and [`token_for`].
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. The notifier runs in developer mode.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let locks = Arc::new(WeekLocks::new());
    let notifier = Arc::new(StatusNotifier::new(None));
    let engine = Arc::new(TimesheetEngine::new(pool.clone(), Arc::clone(&locks)));
    let processor = Arc::new(AdminProcessor::new(
        pool.clone(),
        Arc::clone(&locks),
        notifier,
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        engine,
        processor,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Insert a user row directly; the stored hash is a placeholder because
/// tests authenticate with minted tokens, not passwords.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str, employee_id: Option<&str>) {
    UserRepo::insert(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            role: role.to_string(),
            full_name: "Test User".to_string(),
            employee_id: employee_id.map(str::to_string),
        },
    )
    .await
    .expect("user insert should succeed");
}

/// Mint an access token signed with the test secret.
pub fn token_for(email: &str, role: &str) -> String {
    generate_access_token(email, role, &test_config().jwt)
        .expect("token generation should succeed")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
