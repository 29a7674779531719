//! Artist CRUD handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use core_catalog::models::ArtistInput;
use core_catalog::pagination::PageQuery;
use core_catalog::repositories::{ArtistRepository, SqliteArtistRepository};
use serde::Deserialize;
use serde_json::{json, Value};

/// Query parameters accepted by the artist list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
    pub page: Option<u32>,
}

/// GET /artists
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteArtistRepository::new(state.pool.clone());
    let page = PageQuery::new(query.page.unwrap_or(1));

    let artists = repo.list(query.genre.as_deref(), page).await?;

    Ok(Json(json!({
        "artists": artists,
        "message": "Artists Fetched Successfully",
    })))
}

/// GET /artist/{id}
///
/// Returns the artist with albums attached, each album carrying its songs.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let artist = state.query.load_artist_detail(id).await?;

    Ok(Json(json!({
        "artist": artist,
        "message": "Artist Fetched Successfully",
    })))
}

/// POST /create-artist
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ArtistInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let repo = SqliteArtistRepository::new(state.pool.clone());
    let artist = repo.create(input.into_new()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "artist": artist,
            "message": "Artist Created Successfully",
        })),
    ))
}

/// PUT /update-artist/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ArtistInput>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteArtistRepository::new(state.pool.clone());
    let artist = repo.update(id, input.into_new()?).await?;

    Ok(Json(json!({
        "artist": artist,
        "message": "Artist Updated Successfully",
    })))
}

/// DELETE /delete-artist/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteArtistRepository::new(state.pool.clone());
    repo.delete(id).await?;

    Ok(Json(json!({
        "message": "Artist Deleted Successfully",
    })))
}
