//! # API Error Mapping
//!
//! Translates domain errors from `core-catalog` and `core-auth` into the
//! HTTP status codes and JSON bodies the API promises:
//!
//! - validation failures: 422 with `{message, errors: {field: [message]}}`
//! - missing entities: 404 `{"message": "<Entity> Not Found"}`
//! - blocked deletes: 409 `{"message": "Cannot Delete ... With Existing ..."}`
//! - missing or revoked tokens: 401 `{"message": "Unauthenticated."}`
//! - empty search results: 404 with a fixed message
//! - everything else: 500 `{"message": "Server Error"}`, detail logged

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use core_auth::AuthError;
use core_catalog::CatalogError;
use serde::Serialize;
use serde_json::{json, Map};
use tracing::error;

/// Errors surfaced to API clients.
#[derive(Debug)]
pub enum ApiError {
    /// Request payload failed validation, one field at a time
    Validation { field: String, message: String },

    /// Requested entity does not exist; carries the entity name
    NotFound(String),

    /// Delete blocked by dependent rows; carries the full client message
    Conflict(String),

    /// Missing, malformed, or revoked bearer token
    Unauthenticated,

    /// Search matched nothing, which the API reports as 404
    SearchEmpty,

    /// Unexpected failure; detail is logged, never sent to the client
    Internal(String),
}

#[derive(Serialize)]
struct MessageBody {
    message: String,
}

#[derive(Serialize)]
struct ValidationBody {
    message: String,
    errors: Map<String, serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { field, message } => {
                let mut errors = Map::new();
                errors.insert(field, json!([message]));

                let body = ValidationBody {
                    message: first_error_message(&errors),
                    errors,
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::NotFound(entity) => {
                let body = MessageBody {
                    message: format!("{entity} Not Found"),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Conflict(message) => {
                let body = MessageBody { message };
                (StatusCode::CONFLICT, Json(body)).into_response()
            }
            ApiError::Unauthenticated => {
                let body = MessageBody {
                    message: "Unauthenticated.".to_string(),
                };
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            }
            ApiError::SearchEmpty => {
                let body = MessageBody {
                    message: "No Data Found Match Your Search".to_string(),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            ApiError::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                let body = MessageBody {
                    message: "Server Error".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// The top-level `message` mirrors the first field error.
fn first_error_message(errors: &Map<String, serde_json::Value>) -> String {
    errors
        .values()
        .filter_map(|messages| messages.as_array())
        .flatten()
        .filter_map(|message| message.as_str())
        .next()
        .unwrap_or("The given data was invalid.")
        .to_string()
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput { field, message } => {
                ApiError::Validation { field, message }
            }
            CatalogError::NotFound { entity_type, .. } => ApiError::NotFound(entity_type),
            CatalogError::Conflict {
                entity_type,
                dependents,
                ..
            } => ApiError::Conflict(format!(
                "Cannot Delete {entity_type} With Existing {}",
                capitalize(&dependents)
            )),
            CatalogError::Database(e) => ApiError::Internal(e.to_string()),
            CatalogError::Migration(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailTaken => ApiError::Validation {
                field: "email".to_string(),
                message: "The email has already been taken.".to_string(),
            },
            AuthError::InvalidCredentials => ApiError::Validation {
                field: "email".to_string(),
                message: "These credentials do not match our records.".to_string(),
            },
            AuthError::InvalidToken => ApiError::Unauthenticated,
            AuthError::InvalidInput { field, message } => ApiError::Validation { field, message },
            AuthError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let err = ApiError::Validation {
            field: "name".to_string(),
            message: "The name field is required.".to_string(),
        };

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["message"], "The name field is required.");
        assert_eq!(body["errors"]["name"][0], "The name field is required.");
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let err = ApiError::from(CatalogError::not_found("Artist", 42));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Artist Not Found");
    }

    #[tokio::test]
    async fn test_conflict_message() {
        let err = ApiError::from(CatalogError::Conflict {
            entity_type: "Artist".to_string(),
            id: 1,
            dependents: "albums".to_string(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Cannot Delete Artist With Existing Albums");
    }

    #[tokio::test]
    async fn test_email_taken_maps_to_validation() {
        let err = ApiError::from(AuthError::EmailTaken);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["errors"]["email"][0], "The email has already been taken.");
    }

    #[tokio::test]
    async fn test_invalid_token_maps_to_unauthenticated() {
        let err = ApiError::from(AuthError::InvalidToken);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Unauthenticated.");
    }

    #[tokio::test]
    async fn test_search_empty_message() {
        let response = ApiError::SearchEmpty.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "No Data Found Match Your Search");
    }
}
