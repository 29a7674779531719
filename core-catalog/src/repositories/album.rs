//! Album repository trait and implementation

use crate::error::{CatalogError, Result};
use crate::models::{Album, NewAlbum};
use async_trait::async_trait;
use sqlx::{query, query_as, SqlitePool};

/// Album repository interface for data access operations
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Find an album by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Album>>;

    /// List every album ordered by ID
    async fn list_all(&self) -> Result<Vec<Album>>;

    /// Insert a new album and return the stored row
    ///
    /// # Errors
    /// Returns `InvalidInput` if `artist_id` does not resolve to an artist
    async fn create(&self, album: NewAlbum) -> Result<Album>;

    /// Replace all fields of an existing album
    ///
    /// # Errors
    /// - `InvalidInput` if `artist_id` does not resolve to an artist
    /// - `NotFound` if no album has the given ID
    async fn update(&self, id: i64, album: NewAlbum) -> Result<Album>;

    /// Delete an album by ID
    ///
    /// # Errors
    /// - `Conflict` if the album still owns songs
    /// - `NotFound` if no album has the given ID
    async fn delete(&self, id: i64) -> Result<()>;

    /// List albums owned by the given artist, ordered by ID
    async fn query_by_artist(&self, artist_id: i64) -> Result<Vec<Album>>;

    /// Count total albums
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of AlbumRepository
pub struct SqliteAlbumRepository {
    pool: SqlitePool,
}

impl SqliteAlbumRepository {
    /// Create a new SqliteAlbumRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, id: i64) -> Result<Album> {
        let album = query_as::<_, Album>("SELECT * FROM albums WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(album)
    }

    async fn ensure_artist_exists(&self, artist_id: i64) -> Result<()> {
        let count: i64 = query_as("SELECT COUNT(*) as count FROM artists WHERE id = ?")
            .bind(artist_id)
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        if count == 0 {
            return Err(CatalogError::invalid_input(
                "artist_id",
                "The selected artist id is invalid.",
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl AlbumRepository for SqliteAlbumRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Album>> {
        let album = query_as::<_, Album>("SELECT * FROM albums WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(album)
    }

    async fn list_all(&self) -> Result<Vec<Album>> {
        let albums = query_as::<_, Album>("SELECT * FROM albums ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(albums)
    }

    async fn create(&self, album: NewAlbum) -> Result<Album> {
        self.ensure_artist_exists(album.artist_id).await?;

        let now = chrono::Utc::now().timestamp();

        let result = query(
            r#"
            INSERT INTO albums (title, genre, release_date, artist_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&album.title)
        .bind(&album.genre)
        .bind(&album.release_date)
        .bind(album.artist_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.fetch_one(result.last_insert_rowid()).await
    }

    async fn update(&self, id: i64, album: NewAlbum) -> Result<Album> {
        self.ensure_artist_exists(album.artist_id).await?;

        let now = chrono::Utc::now().timestamp();

        let result = query(
            r#"
            UPDATE albums
            SET title = ?, genre = ?, release_date = ?, artist_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&album.title)
        .bind(&album.genre)
        .bind(&album.release_date)
        .bind(album.artist_id)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Album", id));
        }

        self.fetch_one(id).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let songs: i64 = query_as("SELECT COUNT(*) as count FROM songs WHERE album_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        if songs > 0 {
            return Err(CatalogError::Conflict {
                entity_type: "Album".to_string(),
                id,
                dependents: "songs".to_string(),
            });
        }

        let result = query("DELETE FROM albums WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Album", id));
        }

        Ok(())
    }

    async fn query_by_artist(&self, artist_id: i64) -> Result<Vec<Album>> {
        let albums =
            query_as::<_, Album>("SELECT * FROM albums WHERE artist_id = ? ORDER BY id ASC")
                .bind(artist_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(albums)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = query_as("SELECT COUNT(*) as count FROM albums")
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
    use crate::models::NewArtist;
    use crate::repositories::{ArtistRepository, SqliteArtistRepository};

    async fn seed_artist(pool: &SqlitePool) -> i64 {
        let repo = SqliteArtistRepository::new(pool.clone());
        let artist = repo
            .create(NewArtist {
                name: "Bob Dylan".to_string(),
                genre: "Rock".to_string(),
                country: "USA".to_string(),
            })
            .await
            .unwrap();
        artist.id
    }

    fn new_album(title: &str, artist_id: i64) -> NewAlbum {
        NewAlbum {
            title: title.to_string(),
            genre: "Rock".to_string(),
            release_date: "1975-01-20".to_string(),
            artist_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_album() {
        let pool = create_test_pool().await.unwrap();
        let artist_id = seed_artist(&pool).await;
        let repo = SqliteAlbumRepository::new(pool);

        let created = repo
            .create(new_album("Blood on the Tracks", artist_id))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.artist_id, artist_id);

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_create_album_with_unknown_artist() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteAlbumRepository::new(pool);

        let result = repo.create(new_album("Orphan", 999)).await;
        assert!(matches!(
            result,
            Err(CatalogError::InvalidInput { ref field, .. }) if field == "artist_id"
        ));

        // No row may exist after the refused insert
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_album() {
        let pool = create_test_pool().await.unwrap();
        let artist_id = seed_artist(&pool).await;
        let repo = SqliteAlbumRepository::new(pool);

        let created = repo.create(new_album("Original", artist_id)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                NewAlbum {
                    title: "Renamed".to_string(),
                    genre: "Folk".to_string(),
                    release_date: "1976-01-05".to_string(),
                    artist_id,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.genre, "Folk");
        assert_eq!(updated.release_date, "1976-01-05");
    }

    #[tokio::test]
    async fn test_update_missing_album() {
        let pool = create_test_pool().await.unwrap();
        let artist_id = seed_artist(&pool).await;
        let repo = SqliteAlbumRepository::new(pool);

        let result = repo.update(999, new_album("Ghost", artist_id)).await;
        assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_album_with_unknown_artist() {
        let pool = create_test_pool().await.unwrap();
        let artist_id = seed_artist(&pool).await;
        let repo = SqliteAlbumRepository::new(pool);

        let created = repo.create(new_album("Kept", artist_id)).await.unwrap();

        let result = repo.update(created.id, new_album("Kept", 999)).await;
        assert!(matches!(result, Err(CatalogError::InvalidInput { .. })));

        // Stored row is unchanged
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.artist_id, artist_id);
    }

    #[tokio::test]
    async fn test_delete_album() {
        let pool = create_test_pool().await.unwrap();
        let artist_id = seed_artist(&pool).await;
        let repo = SqliteAlbumRepository::new(pool);

        let created = repo.create(new_album("Doomed", artist_id)).await.unwrap();
        repo.delete(created.id).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_album_with_songs_conflicts() {
        let pool = create_test_pool().await.unwrap();
        let artist_id = seed_artist(&pool).await;
        let repo = SqliteAlbumRepository::new(pool.clone());

        let album = repo.create(new_album("Occupied", artist_id)).await.unwrap();

        sqlx::query(
            r#"
            INSERT INTO songs (title, duration, album_id, created_at, updated_at)
            VALUES ('Tangled Up in Blue', 341, ?, 0, 0)
            "#,
        )
        .bind(album.id)
        .execute(&pool)
        .await
        .unwrap();

        let result = repo.delete(album.id).await;
        assert!(matches!(result, Err(CatalogError::Conflict { .. })));

        let found = repo.find_by_id(album.id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_list_all_and_query_by_artist() {
        let pool = create_test_pool().await.unwrap();
        let first_artist = seed_artist(&pool).await;

        let artist_repo = SqliteArtistRepository::new(pool.clone());
        let second_artist = artist_repo
            .create(NewArtist {
                name: "Joni Mitchell".to_string(),
                genre: "Folk".to_string(),
                country: "Canada".to_string(),
            })
            .await
            .unwrap();

        let repo = SqliteAlbumRepository::new(pool);
        repo.create(new_album("First", first_artist)).await.unwrap();
        repo.create(new_album("Second", second_artist.id))
            .await
            .unwrap();
        repo.create(new_album("Third", first_artist)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let by_artist = repo.query_by_artist(first_artist).await.unwrap();
        assert_eq!(by_artist.len(), 2);
        assert!(by_artist.iter().all(|a| a.artist_id == first_artist));

        let none = repo.query_by_artist(999).await.unwrap();
        assert!(none.is_empty());
    }
}
