//! Bearer-token authentication middleware for the protected route group.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use core_auth::User;
use tracing::debug;

/// The authenticated caller, attached to request extensions by
/// [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Verified account
    pub user: User,

    /// The plaintext token the request presented, needed for logout
    pub token: String,
}

/// Reject requests that do not carry a valid `Authorization: Bearer` token.
///
/// On success the resolved [`CurrentUser`] is inserted into the request
/// extensions for handlers that need the caller.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(&request) else {
        debug!("Request without a bearer token");
        return Err(ApiError::Unauthenticated);
    };

    let user = state.auth.authenticate(&token).await?;

    request.extensions_mut().insert(CurrentUser { user, token });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}
