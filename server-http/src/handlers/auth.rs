//! Account registration, login, and logout.

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use core_auth::{LoginInput, RegisterInput};
use serde_json::{json, Value};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = state.auth.register(input.into_new()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": user,
            "message": "User Registered Successfully",
        })),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<Value>, ApiError> {
    let (user, token) = state.auth.login(input.into_credentials()?).await?;

    Ok(Json(json!({
        "user": user,
        "token": token,
        "message": "User Logged In Successfully",
    })))
}

/// POST /logout
///
/// Revokes exactly the token the request was authenticated with; other
/// sessions of the same user stay valid.
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    state.auth.logout(&current.token).await?;

    Ok(Json(json!({
        "message": "User Logged Out Successfully",
    })))
}
