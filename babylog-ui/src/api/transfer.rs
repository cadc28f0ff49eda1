//! Export and import endpoints

use crate::api::ApiError;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use babylog_common::transfer;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

/// GET /api/export
///
/// The full record set as a pretty-printed JSON attachment named after
/// today's date.
pub async fn export_logs(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state.store.list().await?;
    let body = transfer::to_export_json(&records)?;
    let filename = transfer::export_filename(Utc::now().date_naive());
    info!("Exporting {} records as {}", records.len(), filename);

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, body).into_response())
}

/// POST /api/import
///
/// Body must be a JSON array of records; every record is stored under a
/// freshly generated id so imports never clobber existing entries.
pub async fn import_logs(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let records = transfer::parse_import(&payload)?;
    let count = records.len();
    state.store.bulk_import(records).await?;
    info!("Imported {} records", count);

    Ok(Json(json!({ "imported": count })))
}
