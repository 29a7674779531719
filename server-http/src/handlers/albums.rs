//! Album CRUD handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use core_catalog::models::AlbumInput;
use core_catalog::repositories::{AlbumRepository, SqliteAlbumRepository};
use serde_json::{json, Value};

/// GET /albums
///
/// Returns every album unpaginated.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = SqliteAlbumRepository::new(state.pool.clone());
    let albums = repo.list_all().await?;

    Ok(Json(json!({
        "albums": albums,
        "message": "Albums Fetched Successfully",
    })))
}

/// GET /album/{id}
///
/// Returns the album with its artist and songs attached.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let album = state.query.load_album_detail(id).await?;

    Ok(Json(json!({
        "album": album,
        "message": "Album Fetched Successfully",
    })))
}

/// POST /create-album
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<AlbumInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let repo = SqliteAlbumRepository::new(state.pool.clone());
    let album = repo.create(input.into_new()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "album": album,
            "message": "Album Created Successfully",
        })),
    ))
}

/// PUT /update-album/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<AlbumInput>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteAlbumRepository::new(state.pool.clone());
    let album = repo.update(id, input.into_new()?).await?;

    Ok(Json(json!({
        "album": album,
        "message": "Album Updated Successfully",
    })))
}

/// DELETE /delete-album/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteAlbumRepository::new(state.pool.clone());
    repo.delete(id).await?;

    Ok(Json(json!({
        "message": "Album Deleted Successfully",
    })))
}
