//! Artist repository trait and implementation

use crate::error::{CatalogError, Result};
use crate::models::{Artist, NewArtist};
use crate::pagination::{Page, PageQuery};
use async_trait::async_trait;
use sqlx::{query, query_as, SqlitePool};

/// Artist repository interface for data access operations
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Find an artist by its ID
    ///
    /// # Returns
    /// - `Ok(Some(artist))` if found
    /// - `Ok(None)` if not found
    /// - `Err` if database error occurs
    async fn find_by_id(&self, id: i64) -> Result<Option<Artist>>;

    /// List artists with pagination, optionally filtered by genre
    ///
    /// # Arguments
    /// * `genre` - Optional exact-match genre filter
    /// * `page` - Pagination parameters
    ///
    /// # Returns
    /// Paginated list of artists ordered by ID
    async fn list(&self, genre: Option<&str>, page: PageQuery) -> Result<Page<Artist>>;

    /// Insert a new artist and return the stored row
    async fn create(&self, artist: NewArtist) -> Result<Artist>;

    /// Replace all fields of an existing artist
    ///
    /// # Errors
    /// Returns `NotFound` if no artist has the given ID
    async fn update(&self, id: i64, artist: NewArtist) -> Result<Artist>;

    /// Delete an artist by ID
    ///
    /// # Errors
    /// - `Conflict` if the artist still owns albums
    /// - `NotFound` if no artist has the given ID
    async fn delete(&self, id: i64) -> Result<()>;

    /// Count total artists
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of ArtistRepository
pub struct SqliteArtistRepository {
    pool: SqlitePool,
}

impl SqliteArtistRepository {
    /// Create a new SqliteArtistRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, id: i64) -> Result<Artist> {
        let artist = query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(artist)
    }
}

#[async_trait]
impl ArtistRepository for SqliteArtistRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Artist>> {
        let artist = query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(artist)
    }

    async fn list(&self, genre: Option<&str>, page: PageQuery) -> Result<Page<Artist>> {
        let (total, artists) = match genre {
            Some(genre) => {
                let total: i64 =
                    query_as("SELECT COUNT(*) as count FROM artists WHERE genre = ?")
                        .bind(genre)
                        .fetch_one(&self.pool)
                        .await
                        .map(|row: (i64,)| row.0)?;

                let artists = query_as::<_, Artist>(
                    "SELECT * FROM artists WHERE genre = ? ORDER BY id ASC LIMIT ? OFFSET ?",
                )
                .bind(genre)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&self.pool)
                .await?;

                (total, artists)
            }
            None => {
                let total = self.count().await?;

                let artists =
                    query_as::<_, Artist>("SELECT * FROM artists ORDER BY id ASC LIMIT ? OFFSET ?")
                        .bind(page.limit())
                        .bind(page.offset())
                        .fetch_all(&self.pool)
                        .await?;

                (total, artists)
            }
        };

        Ok(Page::new(artists, total as u64, page))
    }

    async fn create(&self, artist: NewArtist) -> Result<Artist> {
        let now = chrono::Utc::now().timestamp();

        let result = query(
            r#"
            INSERT INTO artists (name, genre, country, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.genre)
        .bind(&artist.country)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.fetch_one(result.last_insert_rowid()).await
    }

    async fn update(&self, id: i64, artist: NewArtist) -> Result<Artist> {
        let now = chrono::Utc::now().timestamp();

        let result = query(
            r#"
            UPDATE artists
            SET name = ?, genre = ?, country = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.genre)
        .bind(&artist.country)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Artist", id));
        }

        self.fetch_one(id).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let albums: i64 = query_as("SELECT COUNT(*) as count FROM albums WHERE artist_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        if albums > 0 {
            return Err(CatalogError::Conflict {
                entity_type: "Artist".to_string(),
                id,
                dependents: "albums".to_string(),
            });
        }

        let result = query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Artist", id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = query_as("SELECT COUNT(*) as count FROM artists")
            .fetch_one(&self.pool)
            .await
            .map(|row: (i64,)| row.0)?;

        Ok(count)
    }
}
