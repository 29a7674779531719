//! # Server Configuration
//!
//! Runtime settings for the HTTP server, resolved from the environment with
//! defaults suited to local development.

use core_catalog::db::DatabaseConfig;

/// Settings the server binary needs before it can listen.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the server binds to
    pub bind_addr: String,

    /// Database URL, e.g. `sqlite:musicbox.db`
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: "sqlite:musicbox.db".to_string(),
            max_connections: 5,
        }
    }
}

impl ServerConfig {
    /// Resolve configuration from the environment.
    ///
    /// Recognized variables, each falling back to the default when unset:
    /// - `BIND_ADDR` (default `0.0.0.0:3000`)
    /// - `DATABASE_URL` (default `sqlite:musicbox.db`)
    /// - `DB_MAX_CONNECTIONS` (default `5`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.max_connections);

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections,
        }
    }

    /// Pool settings derived from this configuration.
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url).max_connections(self.max_connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.database_url, "sqlite:musicbox.db");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_database_config_carries_settings() {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            database_url: "sqlite:test.db".to_string(),
            max_connections: 2,
        };

        let db = config.database_config();
        assert_eq!(db.database_url, "sqlite:test.db");
        assert_eq!(db.max_connections, 2);
    }
}
