//! High-level detail queries for the music catalog.
//!
//! This module composes data from the underlying repositories to answer
//! detail requests with their relations already attached: an artist with its
//! albums and their songs, an album with its artist and songs, a song with
//! its album and that album's artist. Relations are fetched explicitly per
//! path; there is no lazy loading.

use crate::error::{CatalogError, Result};
use crate::models::{Album, Artist, Song};
use crate::repositories::{
    AlbumRepository, ArtistRepository, SongRepository, SqliteAlbumRepository,
    SqliteArtistRepository, SqliteSongRepository,
};
use serde::{Deserialize, Serialize};
use sqlx::{query_as, FromRow, SqlitePool};

/// Artist with all albums and each album's songs attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistDetail {
    /// Artist record.
    #[serde(flatten)]
    pub artist: Artist,
    /// Albums owned by the artist, each with its songs.
    pub albums: Vec<AlbumWithSongs>,
}

/// Album with its songs attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumWithSongs {
    /// Album record.
    #[serde(flatten)]
    pub album: Album,
    /// Songs on the album.
    pub songs: Vec<Song>,
}

/// Album with its owning artist and songs attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDetail {
    /// Album record.
    #[serde(flatten)]
    pub album: Album,
    /// Owning artist.
    pub artist: Artist,
    /// Songs on the album.
    pub songs: Vec<Song>,
}

/// Album with its owning artist attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumWithArtist {
    /// Album record.
    #[serde(flatten)]
    pub album: Album,
    /// Owning artist.
    pub artist: Artist,
}

/// Song with its album and that album's artist attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDetail {
    /// Song record.
    #[serde(flatten)]
    pub song: Song,
    /// Owning album with its artist.
    pub album: AlbumWithArtist,
}

/// Shared SELECT for song detail rows: one flat row per song carrying the
/// album and artist columns under aliases.
pub(crate) const SONG_DETAIL_SELECT: &str = "\
    SELECT \
        songs.id, songs.title, songs.duration, songs.album_id, \
        songs.created_at, songs.updated_at, \
        albums.title AS album_title, albums.genre AS album_genre, \
        albums.release_date AS album_release_date, albums.artist_id AS artist_id, \
        albums.created_at AS album_created_at, albums.updated_at AS album_updated_at, \
        artists.name AS artist_name, artists.genre AS artist_genre, \
        artists.country AS artist_country, \
        artists.created_at AS artist_created_at, artists.updated_at AS artist_updated_at \
    FROM songs \
    INNER JOIN albums ON albums.id = songs.album_id \
    INNER JOIN artists ON artists.id = albums.artist_id";

/// Flat row produced by [`SONG_DETAIL_SELECT`].
#[derive(Debug, Clone, FromRow)]
pub(crate) struct SongDetailRow {
    pub id: i64,
    pub title: String,
    pub duration: i64,
    pub album_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub album_title: String,
    pub album_genre: String,
    pub album_release_date: String,
    pub artist_id: i64,
    pub album_created_at: i64,
    pub album_updated_at: i64,
    pub artist_name: String,
    pub artist_genre: String,
    pub artist_country: String,
    pub artist_created_at: i64,
    pub artist_updated_at: i64,
}

impl SongDetailRow {
    /// Reassemble the flat row into the nested detail shape.
    pub(crate) fn into_detail(self) -> SongDetail {
        SongDetail {
            song: Song {
                id: self.id,
                title: self.title,
                duration: self.duration,
                album_id: self.album_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            album: AlbumWithArtist {
                album: Album {
                    id: self.album_id,
                    title: self.album_title,
                    genre: self.album_genre,
                    release_date: self.album_release_date,
                    artist_id: self.artist_id,
                    created_at: self.album_created_at,
                    updated_at: self.album_updated_at,
                },
                artist: Artist {
                    id: self.artist_id,
                    name: self.artist_name,
                    genre: self.artist_genre,
                    country: self.artist_country,
                    created_at: self.artist_created_at,
                    updated_at: self.artist_updated_at,
                },
            },
        }
    }
}

/// High-level service composing catalog detail queries.
#[derive(Clone)]
pub struct CatalogQueryService {
    pool: SqlitePool,
}

impl CatalogQueryService {
    /// Create a new `CatalogQueryService` backed by the provided pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch an artist with albums and each album's songs attached.
    ///
    /// An artist without albums yields an empty `albums` collection; an
    /// album without songs yields an empty `songs` collection.
    pub async fn load_artist_detail(&self, artist_id: i64) -> Result<ArtistDetail> {
        let artist_repo = SqliteArtistRepository::new(self.pool.clone());
        let artist = artist_repo
            .find_by_id(artist_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Artist", artist_id))?;

        let album_repo = SqliteAlbumRepository::new(self.pool.clone());
        let song_repo = SqliteSongRepository::new(self.pool.clone());

        let mut albums = Vec::new();
        for album in album_repo.query_by_artist(artist_id).await? {
            let songs = song_repo.query_by_album(album.id).await?;
            albums.push(AlbumWithSongs { album, songs });
        }

        Ok(ArtistDetail { artist, albums })
    }

    /// Fetch an album with its owning artist and songs attached.
    pub async fn load_album_detail(&self, album_id: i64) -> Result<AlbumDetail> {
        let album_repo = SqliteAlbumRepository::new(self.pool.clone());
        let album = album_repo
            .find_by_id(album_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Album", album_id))?;

        let artist_repo = SqliteArtistRepository::new(self.pool.clone());
        let artist = artist_repo
            .find_by_id(album.artist_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Artist", album.artist_id))?;

        let song_repo = SqliteSongRepository::new(self.pool.clone());
        let songs = song_repo.query_by_album(album_id).await?;

        Ok(AlbumDetail {
            album,
            artist,
            songs,
        })
    }

    /// Fetch a song with its album and that album's artist attached.
    pub async fn load_song_detail(&self, song_id: i64) -> Result<SongDetail> {
        let sql = format!("{SONG_DETAIL_SELECT} WHERE songs.id = ?");
        let row = query_as::<_, SongDetailRow>(&sql)
            .bind(song_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(SongDetailRow::into_detail)
            .ok_or_else(|| CatalogError::not_found("Song", song_id))
    }
}
