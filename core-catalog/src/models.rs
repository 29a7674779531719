//! Domain models for the music catalog
//!
//! Row models map directly to catalog tables. Each mutating operation has an
//! input struct with optional fields (the raw request body) that converts
//! into a validated form before any SQL runs. Validation fails on the first
//! offending field and carries the API's published message wording.

use crate::error::{CatalogError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Date format accepted for album release dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Row Models
// =============================================================================

/// Artist with genre and country of origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Artist {
    /// Unique identifier
    pub id: i64,
    /// Artist name
    pub name: String,
    /// Music genre
    pub genre: String,
    /// Country of origin
    pub country: String,
    /// Creation time (unix seconds)
    pub created_at: i64,
    /// Last update time (unix seconds)
    pub updated_at: i64,
}

/// Album released by an artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Album {
    /// Unique identifier
    pub id: i64,
    /// Album title
    pub title: String,
    /// Music genre
    pub genre: String,
    /// Release date (YYYY-MM-DD)
    pub release_date: String,
    /// Owning artist
    pub artist_id: i64,
    /// Creation time (unix seconds)
    pub created_at: i64,
    /// Last update time (unix seconds)
    pub updated_at: i64,
}

/// Song belonging to an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Song {
    /// Unique identifier
    pub id: i64,
    /// Song title
    pub title: String,
    /// Duration in seconds
    pub duration: i64,
    /// Owning album
    pub album_id: i64,
    /// Creation time (unix seconds)
    pub created_at: i64,
    /// Last update time (unix seconds)
    pub updated_at: i64,
}

// =============================================================================
// Validation helpers
// =============================================================================

/// Humanize a field name the way validation messages spell it
/// ("release_date" reads "release date").
fn humanize(field: &str) -> String {
    field.replace('_', " ")
}

fn required_error(field: &str) -> CatalogError {
    CatalogError::invalid_input(
        field,
        format!("The {} field is required.", humanize(field)),
    )
}

/// Extract a required, non-blank string field.
fn require_string(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(required_error(field)),
    }
}

/// Extract a required numeric field.
fn require_i64(field: &str, value: Option<i64>) -> Result<i64> {
    value.ok_or_else(|| required_error(field))
}

/// Validate a date string against [`DATE_FORMAT`].
fn validate_date(field: &str, value: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        CatalogError::invalid_input(
            field,
            format!("The {} field must be a valid date.", humanize(field)),
        )
    })?;
    Ok(())
}

/// Validate a positive duration (at least one second).
fn validate_duration(field: &str, value: i64) -> Result<()> {
    if value < 1 {
        return Err(CatalogError::invalid_input(
            field,
            format!("The {} field must be at least 1.", humanize(field)),
        ));
    }
    Ok(())
}

// =============================================================================
// Artist inputs
// =============================================================================

/// Raw artist payload as received from a request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistInput {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub country: Option<String>,
}

/// Validated artist data ready for insert or full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
    pub name: String,
    pub genre: String,
    pub country: String,
}

impl ArtistInput {
    /// Validate all fields as required and produce insertable data.
    pub fn into_new(self) -> Result<NewArtist> {
        Ok(NewArtist {
            name: require_string("name", self.name)?,
            genre: require_string("genre", self.genre)?,
            country: require_string("country", self.country)?,
        })
    }
}

// =============================================================================
// Album inputs
// =============================================================================

/// Raw album payload as received from a request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumInput {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<String>,
    pub artist_id: Option<i64>,
}

/// Validated album data ready for insert or full update
///
/// `artist_id` is syntactically valid here; whether it resolves to an
/// existing artist is checked by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlbum {
    pub title: String,
    pub genre: String,
    pub release_date: String,
    pub artist_id: i64,
}

impl AlbumInput {
    /// Validate all fields as required and produce insertable data.
    pub fn into_new(self) -> Result<NewAlbum> {
        let title = require_string("title", self.title)?;
        let genre = require_string("genre", self.genre)?;
        let release_date = require_string("release_date", self.release_date)?;
        validate_date("release_date", &release_date)?;
        let artist_id = require_i64("artist_id", self.artist_id)?;

        Ok(NewAlbum {
            title,
            genre,
            release_date,
            artist_id,
        })
    }
}

// =============================================================================
// Song inputs
// =============================================================================

/// Raw song payload as received from a request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongInput {
    pub title: Option<String>,
    pub duration: Option<i64>,
    pub album_id: Option<i64>,
}

/// Validated song data ready for insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub duration: i64,
    pub album_id: i64,
}

/// Partial song update. Absent fields keep their stored values; present
/// fields must pass the same checks as on create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongPatch {
    pub title: Option<String>,
    pub duration: Option<i64>,
    pub album_id: Option<i64>,
}

impl SongInput {
    /// Validate all fields as required and produce insertable data.
    pub fn into_new(self) -> Result<NewSong> {
        let title = require_string("title", self.title)?;
        let duration = require_i64("duration", self.duration)?;
        validate_duration("duration", duration)?;
        let album_id = require_i64("album_id", self.album_id)?;

        Ok(NewSong {
            title,
            duration,
            album_id,
        })
    }

    /// Validate only the fields that are present and produce a patch.
    pub fn into_patch(self) -> Result<SongPatch> {
        let title = match self.title {
            Some(t) => Some(require_string("title", Some(t))?),
            None => None,
        };

        if let Some(duration) = self.duration {
            validate_duration("duration", duration)?;
        }

        Ok(SongPatch {
            title,
            duration: self.duration,
            album_id: self.album_id,
        })
    }
}
