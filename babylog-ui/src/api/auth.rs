//! Session endpoints
//!
//! The passphrase is an identity seed, not a verified credential; login
//! only decides which data partition becomes visible.

use crate::api::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub passphrase: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub identity: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let identity = state.session.login(&request.passphrase)?;
    info!("Session opened");
    Ok(Json(LoginResponse { identity }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.session.logout()?;
    info!("Session closed");
    Ok(Json(json!({})))
}

/// GET /api/auth/session
pub async fn session_status(State(state): State<AppState>) -> Json<SessionResponse> {
    let identity = state.session.identity();
    Json(SessionResponse {
        authenticated: identity.is_some(),
        identity,
    })
}
