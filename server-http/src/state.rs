//! Shared application state handed to every handler.

use core_auth::AuthService;
use core_catalog::relations::CatalogQueryService;
use sqlx::SqlitePool;

/// State shared across all routes.
///
/// Cloning is cheap: the pool and both services are handles onto the same
/// underlying connections.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool, used to build per-request repositories
    pub pool: SqlitePool,

    /// Account registration, login, and token verification
    pub auth: AuthService,

    /// Nested detail reads (artist with albums and songs, etc.)
    pub query: CatalogQueryService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            auth: AuthService::new(pool.clone()),
            query: CatalogQueryService::new(pool.clone()),
            pool,
        }
    }
}
