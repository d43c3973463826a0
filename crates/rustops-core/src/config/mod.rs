//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod directory;
pub mod identity;
pub mod logging;
pub mod lookup;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::directory::DirectoryConfig;
pub use self::identity::IdentityConfig;
pub use self::logging::LoggingConfig;
pub use self::lookup::LookupConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `RUSTOPS__*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Roster store connection settings.
    pub database: DatabaseConfig,
    /// Directory service (BattleMetrics) settings.
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Identity provider (Steam) settings.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Lookup fan-out and disambiguation tuning.
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base file at `path` with an optional `config/{env}`
    /// overlay and environment variables prefixed with `RUSTOPS`
    /// (e.g. `RUSTOPS__DIRECTORY__TOKEN`).
    pub fn load(path: &str, env: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(path).required(false));

        if let Some(env) = env {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("RUSTOPS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
