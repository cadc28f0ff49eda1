//! babylog-ui library - application controller HTTP service
//!
//! Exposes the load/save/delete/import/export orchestration as a JSON API
//! for the form UI. The storage facade hides which backend is active.

use axum::Router;
use babylog_common::identity::Session;
use babylog_common::store::Store;
use std::sync::Arc;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active storage backend, selected once at startup
    pub store: Arc<Store>,
    /// Persisted session identity
    pub session: Arc<Session>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<Store>, session: Arc<Session>) -> Self {
        Self { store, session }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    Router::new()
        .route("/api/auth/login", post(api::login))
        .route("/api/auth/logout", post(api::logout))
        .route("/api/auth/session", get(api::session_status))
        .route("/api/logs", get(api::list_logs).post(api::save_log))
        .route("/api/logs/:id", delete(api::delete_log))
        .route("/api/export", get(api::export_logs))
        .route("/api/import", post(api::import_logs))
        .merge(api::health_routes())
        .with_state(state)
}
