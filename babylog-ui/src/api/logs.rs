//! Record CRUD endpoints
//!
//! Save accepts an arbitrary (possibly partial) record document and
//! normalizes it before storing. A record without an id is a new entry:
//! the controller mints the id, stamps `createdAt`, and appends the
//! computed daily totals to the summary. A record with an id is an edit
//! and is upserted exactly as submitted.

use crate::api::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use babylog_common::schema;
use babylog_common::LogRecord;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

/// GET /api/logs
pub async fn list_logs(State(state): State<AppState>) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let records = state.store.list().await?;
    Ok(Json(records))
}

/// POST /api/logs
pub async fn save_log(
    State(state): State<AppState>,
    Json(raw): Json<Value>,
) -> Result<Json<LogRecord>, ApiError> {
    let mut record = schema::normalize(Some(&raw));

    if record.id.is_empty() {
        record.id = Uuid::new_v4().to_string();
        record.created_at = Utc::now().to_rfc3339();
        schema::append_daily_totals(&mut record);
    }

    let stored = state.store.upsert(record).await?;
    Ok(Json(stored))
}

/// DELETE /api/logs/:id
pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.remove(&id).await?;
    Ok(Json(json!({})))
}
