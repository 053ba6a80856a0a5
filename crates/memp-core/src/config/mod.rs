//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and each component receives only its own section at
//! construction time.

pub mod app;
pub mod attachment;
pub mod database;
pub mod logging;
pub mod reporting;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::attachment::AttachmentConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::reporting::ReportingConfig;

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
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Report attachment storage settings.
    #[serde(default)]
    pub attachments: AttachmentConfig,
    /// Report generation settings.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with the `config/{env}.toml` overlay
    /// and environment variables prefixed with `MEMP__`
    /// (e.g. `MEMP__DATABASE__URL`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MEMP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        tracing::debug!(dir, env, provider = %parsed.database.provider, "Configuration loaded");
        Ok(parsed)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.attachments.max_upload_size_bytes == 0 {
            return Err(AppError::configuration(
                "attachments.max_upload_size_bytes must be greater than zero",
            ));
        }
        if self.reporting.query_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "reporting.query_timeout_seconds must be greater than zero",
            ));
        }
        self.attachments.validate()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            attachments: AttachmentConfig::default(),
            reporting: ReportingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
