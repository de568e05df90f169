//! Catalog service configuration.

use std::env;

use common::DatabaseConfig;

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct CatalogServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Database connection and pool settings
    pub database: DatabaseConfig,
}

impl CatalogServiceConfig {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        Self {
            service_name: lookup("CATALOG_SERVICE_NAME")
                .unwrap_or_else(|| "catalog-service".to_string()),
            database: DatabaseConfig {
                url: lookup("CATALOG_DATABASE_URL")
                    .or_else(|| lookup("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: lookup("DATABASE_MIN_CONNECTIONS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.min_connections),
                connect_timeout_secs: lookup("DATABASE_CONNECT_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.connect_timeout_secs),
                sql_logging: lookup("DATABASE_SQL_LOGGING")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.sql_logging),
            },
        }
    }
}

impl Default for CatalogServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "catalog-service".to_string(),
            database: DatabaseConfig::default(),
        }
    }
}
