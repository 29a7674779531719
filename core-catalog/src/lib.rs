//! # Catalog Management Module
//!
//! Owns the canonical music catalog database and provides repository patterns
//! for data access.
//!
//! ## Overview
//!
//! This module manages:
//! - SQLite database schema and migrations
//! - Repository patterns for artists, albums, and songs
//! - Detail queries with album and artist relations attached
//! - Substring search over songs with pagination

pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod relations;
pub mod repositories;

pub use error::{CatalogError, Result};
