//! # Repository Pattern Implementation
//!
//! This module provides repository traits and implementations for catalog
//! data access. Each entity has a corresponding repository with CRUD
//! operations, querying, and pagination support.
//!
//! ## Architecture
//!
//! - Traits define the interface for each repository
//! - SQLite implementations use sqlx for async database access
//! - All operations return `Result<T>` for error handling
//! - Input structs are validated before any SQL runs
//! - Foreign keys are pre-checked so callers see an input error,
//!   not a driver integrity error
//!
//! ## Available Repositories
//!
//! - `ArtistRepository` - Artists with genre filter and pagination
//! - `AlbumRepository` - Albums owned by artists
//! - `SongRepository` - Songs owned by albums, with substring search

pub mod album;
pub mod artist;
pub mod song;

pub use album::{AlbumRepository, SqliteAlbumRepository};
pub use artist::{ArtistRepository, SqliteArtistRepository};
pub use song::{SongRepository, SongSearch, SqliteSongRepository};
