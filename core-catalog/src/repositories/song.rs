//! Song repository trait and implementation

use crate::error::{CatalogError, Result};
use crate::models::{NewSong, Song, SongPatch};
use crate::pagination::{Page, PageQuery};
use crate::relations::{SongDetail, SongDetailRow, SONG_DETAIL_SELECT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{query, query_as, SqlitePool};

/// Search parameters for songs. Both predicates are optional,
/// case-insensitive, unanchored substring matches; when both are given a
/// song must satisfy both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSearch {
    /// Substring to match against the song title
    pub title: Option<String>,
    /// Substring to match against the owning album's artist name
    pub artist: Option<String>,
}

/// Song repository interface for data access operations
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Find a song by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Song>>;

    /// List every song with its album and artist attached, ordered by ID
    async fn list_all_with_album_artist(&self) -> Result<Vec<SongDetail>>;

    /// Insert a new song and return the stored row
    ///
    /// # Errors
    /// Returns `InvalidInput` if `album_id` does not resolve to an album
    async fn create(&self, song: NewSong) -> Result<Song>;

    /// Apply a partial update to an existing song
    ///
    /// Absent patch fields keep their stored values.
    ///
    /// # Errors
    /// - `InvalidInput` if a supplied `album_id` does not resolve to an album
    /// - `NotFound` if no song has the given ID
    async fn update(&self, id: i64, patch: SongPatch) -> Result<Song>;

    /// Delete a song by ID
    ///
    /// # Errors
    /// Returns `NotFound` if no song has the given ID
    async fn delete(&self, id: i64) -> Result<()>;

    /// List songs on the given album, ordered by ID
    async fn query_by_album(&self, album_id: i64) -> Result<Vec<Song>>;

    /// Search songs by title and artist-name substrings
    ///
    /// With neither predicate supplied every song matches. Results carry
    /// the owning album and artist, ordered by song ID.
    async fn search(&self, search: &SongSearch, page: PageQuery) -> Result<Page<SongDetail>>;

    /// Count total songs
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of SongRepository
pub struct SqliteSongRepository {
    pool: SqlitePool,
}

impl SqliteSongRepository {
    /// Create a new SqliteSongRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, id: i64) -> Result<Song> {
        let song = query_as::<_, Song>("SELECT * FROM songs WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(song)
    }

    async fn ensure_album_exists(&self, album_id: i64) -> Result<()> {
        let count: i64 = query_as("SELECT COUNT(*) as count FROM albums WHERE id = ?")
            .bind(album_id)
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        if count == 0 {
            return Err(CatalogError::invalid_input(
                "album_id",
                "The selected album id is invalid.",
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl SongRepository for SqliteSongRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Song>> {
        let song = query_as::<_, Song>("SELECT * FROM songs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(song)
    }

    async fn list_all_with_album_artist(&self) -> Result<Vec<SongDetail>> {
        let sql = format!("{SONG_DETAIL_SELECT} ORDER BY songs.id ASC");
        let rows = query_as::<_, SongDetailRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(SongDetailRow::into_detail).collect())
    }

    async fn create(&self, song: NewSong) -> Result<Song> {
        self.ensure_album_exists(song.album_id).await?;

        let now = chrono::Utc::now().timestamp();

        let result = query(
            r#"
            INSERT INTO songs (title, duration, album_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&song.title)
        .bind(song.duration)
        .bind(song.album_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.fetch_one(result.last_insert_rowid()).await
    }

    async fn update(&self, id: i64, patch: SongPatch) -> Result<Song> {
        if let Some(album_id) = patch.album_id {
            self.ensure_album_exists(album_id).await?;
        }

        let now = chrono::Utc::now().timestamp();

        // NULL binds leave the stored column value in place
        let result = query(
            r#"
            UPDATE songs
            SET title = COALESCE(?, title),
                duration = COALESCE(?, duration),
                album_id = COALESCE(?, album_id),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(patch.duration)
        .bind(patch.album_id)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Song", id));
        }

        self.fetch_one(id).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Song", id));
        }

        Ok(())
    }

    async fn query_by_album(&self, album_id: i64) -> Result<Vec<Song>> {
        let songs = query_as::<_, Song>("SELECT * FROM songs WHERE album_id = ? ORDER BY id ASC")
            .bind(album_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(songs)
    }

    async fn search(&self, search: &SongSearch, page: PageQuery) -> Result<Page<SongDetail>> {
        let mut conditions = Vec::new();

        if search.title.is_some() {
            conditions.push("lower(songs.title) LIKE '%' || lower(?) || '%'");
        }

        if search.artist.is_some() {
            conditions.push("lower(artists.name) LIKE '%' || lower(?) || '%'");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!(
            "SELECT COUNT(*) as count FROM songs \
             INNER JOIN albums ON albums.id = songs.album_id \
             INNER JOIN artists ON artists.id = albums.artist_id{where_clause}"
        );

        let mut count_query = query_as::<_, (i64,)>(&count_sql);
        if let Some(title) = &search.title {
            count_query = count_query.bind(title);
        }
        if let Some(artist) = &search.artist {
            count_query = count_query.bind(artist);
        }
        let total = count_query.fetch_one(&self.pool).await?.0;

        let select_sql =
            format!("{SONG_DETAIL_SELECT}{where_clause} ORDER BY songs.id ASC LIMIT ? OFFSET ?");

        let mut select_query = query_as::<_, SongDetailRow>(&select_sql);
        if let Some(title) = &search.title {
            select_query = select_query.bind(title);
        }
        if let Some(artist) = &search.artist {
            select_query = select_query.bind(artist);
        }
        let rows = select_query
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(SongDetailRow::into_detail)
            .collect::<Vec<_>>();

        Ok(Page::new(items, total as u64, page))
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = query_as("SELECT COUNT(*) as count FROM songs")
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::models::{NewAlbum, NewArtist};
    use crate::repositories::{
        AlbumRepository, ArtistRepository, SqliteAlbumRepository, SqliteArtistRepository,
    };

    async fn seed_album_for(pool: &SqlitePool, artist_name: &str) -> i64 {
        let artist = SqliteArtistRepository::new(pool.clone())
            .create(NewArtist {
                name: artist_name.to_string(),
                genre: "Rock".to_string(),
                country: "USA".to_string(),
            })
            .await
            .unwrap();

        let album = SqliteAlbumRepository::new(pool.clone())
            .create(NewAlbum {
                title: format!("{} Album", artist_name),
                genre: "Rock".to_string(),
                release_date: "1980-06-01".to_string(),
                artist_id: artist.id,
            })
            .await
            .unwrap();

        album.id
    }

    fn new_song(title: &str, album_id: i64) -> NewSong {
        NewSong {
            title: title.to_string(),
            duration: 200,
            album_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_song() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        let created = repo.create(new_song("Love Sick", album_id)).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.duration, 200);

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_create_song_with_unknown_album() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteSongRepository::new(pool);

        let result = repo.create(new_song("Orphan", 999)).await;
        assert!(matches!(
            result,
            Err(CatalogError::InvalidInput { ref field, .. }) if field == "album_id"
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_song_partial() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        let created = repo.create(new_song("Original", album_id)).await.unwrap();

        // Title only; duration and album stay put
        let updated = repo
            .update(
                created.id,
                SongPatch {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.duration, created.duration);
        assert_eq!(updated.album_id, created.album_id);

        // Duration only
        let updated = repo
            .update(
                created.id,
                SongPatch {
                    duration: Some(321),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.duration, 321);
    }

    #[tokio::test]
    async fn test_update_song_moves_album() {
        let pool = create_test_pool().await.unwrap();
        let first = seed_album_for(&pool, "Bob Dylan").await;
        let second = seed_album_for(&pool, "Joni Mitchell").await;
        let repo = SqliteSongRepository::new(pool);

        let created = repo.create(new_song("Wanderer", first)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                SongPatch {
                    album_id: Some(second),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.album_id, second);
    }

    #[tokio::test]
    async fn test_update_song_with_unknown_album() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        let created = repo.create(new_song("Stuck", album_id)).await.unwrap();

        let result = repo
            .update(
                created.id,
                SongPatch {
                    album_id: Some(999),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogError::InvalidInput { .. })));

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.album_id, album_id);
    }

    #[tokio::test]
    async fn test_update_missing_song() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteSongRepository::new(pool);

        let result = repo.update(999, SongPatch::default()).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_song() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        let created = repo.create(new_song("Doomed", album_id)).await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());

        let result = repo.delete(created.id).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_all_with_album_artist() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        repo.create(new_song("First", album_id)).await.unwrap();
        repo.create(new_song("Second", album_id)).await.unwrap();

        let details = repo.list_all_with_album_artist().await.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].song.title, "First");
        assert_eq!(details[0].album.artist.name, "Bob Dylan");
    }

    #[tokio::test]
    async fn test_search_by_title_is_case_insensitive() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        repo.create(new_song("Love Sick", album_id)).await.unwrap();
        repo.create(new_song("LOVESTRUCK", album_id)).await.unwrap();
        repo.create(new_song("Hurricane", album_id)).await.unwrap();

        let search = SongSearch {
            title: Some("love".to_string()),
            artist: None,
        };

        let page = repo.search(&search, PageQuery::new(1)).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(page
            .items
            .iter()
            .all(|d| d.song.title.to_lowercase().contains("love")));
    }

    #[tokio::test]
    async fn test_search_combines_title_and_artist() {
        let pool = create_test_pool().await.unwrap();
        let dylan_album = seed_album_for(&pool, "Bob Dylan").await;
        let marley_album = seed_album_for(&pool, "Bob Marley").await;
        let whitney_album = seed_album_for(&pool, "Whitney Houston").await;
        let repo = SqliteSongRepository::new(pool);

        repo.create(new_song("Love Sick", dylan_album)).await.unwrap();
        repo.create(new_song("Is This Love", marley_album))
            .await
            .unwrap();
        repo.create(new_song("Where Do Broken Hearts Go", marley_album))
            .await
            .unwrap();
        repo.create(new_song("I Will Always Love You", whitney_album))
            .await
            .unwrap();

        let search = SongSearch {
            title: Some("Love".to_string()),
            artist: Some("bob".to_string()),
        };

        let page = repo.search(&search, PageQuery::new(1)).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(page
            .items
            .iter()
            .all(|d| d.album.artist.name.starts_with("Bob")));
    }

    #[tokio::test]
    async fn test_search_without_predicates_matches_all() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        repo.create(new_song("One", album_id)).await.unwrap();
        repo.create(new_song("Two", album_id)).await.unwrap();

        let page = repo
            .search(&SongSearch::default(), PageQuery::new(1))
            .await
            .unwrap();

        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_search_no_matches_yields_zero_total() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        repo.create(new_song("Hurricane", album_id)).await.unwrap();

        let search = SongSearch {
            title: Some("zzzz".to_string()),
            artist: None,
        };

        let page = repo.search(&search, PageQuery::new(1)).await.unwrap();
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_search_pagination() {
        let pool = create_test_pool().await.unwrap();
        let album_id = seed_album_for(&pool, "Bob Dylan").await;
        let repo = SqliteSongRepository::new(pool);

        for i in 1..=13 {
            repo.create(new_song(&format!("Love Song {}", i), album_id))
                .await
                .unwrap();
        }

        let search = SongSearch {
            title: Some("Love".to_string()),
            artist: None,
        };

        let page = repo.search(&search, PageQuery::new(2)).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 13);
        assert_eq!(page.last_page, 2);
        assert_eq!(page.items[0].song.title, "Love Song 11");
    }
}
