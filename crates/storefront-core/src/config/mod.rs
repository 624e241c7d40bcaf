//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every section has defaults so a missing file still loads.

pub mod logging;
pub mod routes;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::routes::{RouteConfig, RouteFallback};
pub use self::session::{SessionConfig, StorageBackend};

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `STOREFRONT__SESSION__DIRECTORY`.
const ENV_PREFIX: &str = "STOREFRONT";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Session persistence settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Guarded route table.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Values are overlaid with environment
    /// variables prefixed with `STOREFRONT__`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
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
}
