//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod logging;
pub mod plugin;
pub mod smartspace;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::plugin::PluginConfig;
pub use self::smartspace::SmartspaceConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identity of the local smartspace.
    pub smartspace: SmartspaceConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Store backend settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Action plugin settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory.
    ///
    /// Merges `config/default.toml` with an environment-specific overlay
    /// and environment variables prefixed with `SMARTSPACE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config/default", env)
    }

    /// Load configuration starting from an explicit base file.
    ///
    /// The environment overlay is looked up next to the base file.
    pub fn load_from(base: &str, env: &str) -> Result<Self, AppError> {
        let base = base.trim_end_matches(".toml");
        let overlay = match base.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{env}"),
            None => env.to_string(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix("SMARTSPACE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.smartspace.name.trim().is_empty() {
            return Err(AppError::configuration("smartspace.name must not be empty"));
        }
        if self.smartspace.name.contains('#') {
            return Err(AppError::configuration(
                "smartspace.name must not contain the key separator '#'",
            ));
        }
        if self.database.provider == StoreProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when database.provider = \"postgres\"",
            ));
        }
        Ok(())
    }

    /// Configuration for tests and local experiments: in-memory stores,
    /// every built-in plugin enabled.
    pub fn in_memory(smartspace_name: impl Into<String>) -> Self {
        Self {
            smartspace: SmartspaceConfig {
                name: smartspace_name.into(),
            },
            server: ServerConfig::default(),
            database: DatabaseConfig {
                provider: StoreProvider::Memory,
                ..DatabaseConfig::default()
            },
            plugins: PluginConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_config_is_valid() {
        let config = AppConfig::in_memory("2019B.test");
        assert!(config.validate().is_ok());
        assert_eq!(config.database.provider, StoreProvider::Memory);
    }

    #[test]
    fn test_rejects_blank_smartspace_name() {
        let config = AppConfig::in_memory("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_separator_in_name() {
        let config = AppConfig::in_memory("a#b");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = AppConfig::in_memory("local");
        config.database.provider = StoreProvider::Postgres;
        assert!(config.validate().is_err());
        config.database.url = "postgres://localhost/smartspace".to_string();
        assert!(config.validate().is_ok());
    }
}
