use std::sync::Arc;

use crate::config::ServerConfig;
use crate::engine::admin::AdminProcessor;
use crate::engine::timesheet::TimesheetEngine;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: punchcard_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Owner-side entry engine (create/update/delete/submit/list).
    pub engine: Arc<TimesheetEngine>,
    /// Administrator-side week processor.
    pub processor: Arc<AdminProcessor>,
}
