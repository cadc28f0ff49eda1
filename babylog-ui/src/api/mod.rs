//! HTTP API handlers

mod auth;
mod health;
mod logs;
mod transfer;

pub use auth::{login, logout, session_status};
pub use health::{health_check, health_routes};
pub use logs::{delete_log, list_logs, save_log};
pub use transfer::{export_logs, import_logs};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use babylog_common::Error;
use serde_json::json;
use tracing::error;

/// Wrapper mapping storage/identity errors onto HTTP responses.
///
/// Every boundary failure ends in a reported JSON error, never a panic:
/// user mistakes (blank passphrase, malformed import) are 400, a missing
/// session identity is 401, storage failures are 500.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::EmptyCredential | Error::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            Error::NotAuthenticated => StatusCode::UNAUTHORIZED,
            _ => {
                error!("Storage operation failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
