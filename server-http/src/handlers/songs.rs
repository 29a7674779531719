//! Song CRUD and search handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use core_catalog::models::SongInput;
use core_catalog::pagination::PageQuery;
use core_catalog::repositories::{SongRepository, SongSearch, SqliteSongRepository};
use serde::Deserialize;
use serde_json::{json, Value};

/// Query parameters accepted by the song search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub page: Option<u32>,
}

/// GET /songs
///
/// Returns every song with its album and the album's artist attached.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = SqliteSongRepository::new(state.pool.clone());
    let songs = repo.list_all_with_album_artist().await?;

    Ok(Json(json!({
        "songs": songs,
        "message": "Songs Fetched Successfully",
    })))
}

/// GET /song/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let song = state.query.load_song_detail(id).await?;

    Ok(Json(json!({
        "song": song,
        "message": "Song Fetched Successfully",
    })))
}

/// GET /songs/search
///
/// Substring match on song title and artist name, AND-combined when both
/// are given. No matches at all is a 404, not an empty page.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteSongRepository::new(state.pool.clone());
    let search = SongSearch {
        title: query.title,
        artist: query.artist,
    };
    let page = PageQuery::new(query.page.unwrap_or(1));

    let songs = repo.search(&search, page).await?;

    if songs.total == 0 {
        return Err(ApiError::SearchEmpty);
    }

    Ok(Json(json!({
        "songs": songs,
        "message": "Songs Fetched Successfully",
    })))
}

/// POST /create-song
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SongInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let repo = SqliteSongRepository::new(state.pool.clone());
    let song = repo.create(input.into_new()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "song": song,
            "message": "Song Created Successfully",
        })),
    ))
}

/// PUT /update-song/{id}
///
/// Partial update. Absent fields keep their stored values.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<SongInput>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteSongRepository::new(state.pool.clone());
    let song = repo.update(id, input.into_patch()?).await?;

    Ok(Json(json!({
        "song": song,
        "message": "Song Updated Successfully",
    })))
}

/// DELETE /delete-song/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let repo = SqliteSongRepository::new(state.pool.clone());
    repo.delete(id).await?;

    Ok(Json(json!({
        "message": "Song Deleted Successfully",
    })))
}
