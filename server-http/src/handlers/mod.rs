//! Request handlers grouped by resource.
//!
//! Every handler follows the same shape: pull what it needs from
//! [`AppState`](crate::state::AppState), validate the payload through the
//! input types in `core-catalog`/`core-auth`, and wrap the result in the
//! `{<resource>, message}` envelope the API promises. Domain errors convert
//! into [`ApiError`](crate::error::ApiError) via `?`.

pub mod albums;
pub mod artists;
pub mod auth;
pub mod songs;

use axum::Json;
use serde::Serialize;

/// Liveness probe payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// GET /up
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
