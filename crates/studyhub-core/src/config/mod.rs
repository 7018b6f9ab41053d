//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Physical file store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay and
    /// environment variables of the form `STUDYHUB__SECTION__KEY`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("STUDYHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Resolve the active environment name from `STUDYHUB_ENV`.
    pub fn environment() -> String {
        std::env::var("STUDYHUB_ENV").unwrap_or_else(|_| "development".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config = config::Config::builder()
            .set_override("database.url", "sqlite://studyhub.db?mode=rwc")
            .expect("override")
            .build()
            .expect("build");
        let app: AppConfig = config.try_deserialize().expect("deserialize");

        assert_eq!(app.server.port, 9000);
        assert_eq!(app.server.cors.allowed_origins, vec!["*".to_string()]);
        assert_eq!(app.storage.root_path, ".");
        assert_eq!(app.storage.max_upload_size_bytes, 50 * 1024 * 1024);
        assert_eq!(app.logging.level, "info");
        assert_eq!(app.database.max_connections, 10);
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let config = config::Config::builder().build().expect("build");
        let result: Result<AppConfig, _> = config.try_deserialize();
        assert!(result.is_err());
    }
}
