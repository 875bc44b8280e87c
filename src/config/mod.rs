//! Application configuration module
//!
//! Type-safe configuration loaded with the `config` and `dotenvy` crates.
//! Environment variables carry the `EVENTHUB` prefix and nested values are
//! separated with a double underscore. An optional TOML/JSON/YAML file named
//! by `EVENTHUB_CONFIG_FILE` is layered underneath the environment.
//!
//! # Example
//!
//! ```no_run
//! use eventhub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::path::Path;

/// Names an optional config file loaded before the environment.
pub const CONFIG_FILE_VAR: &str = "EVENTHUB_CONFIG_FILE";

const ENV_PREFIX: &str = "EVENTHUB";

/// Root application configuration
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// - `.env` is read first when present
    /// - `EVENTHUB_CONFIG_FILE`, if set, must point at a readable file
    /// - `EVENTHUB__SERVER__PORT=8080` becomes `server.port = 8080`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let file = std::env::var(CONFIG_FILE_VAR).ok();
        Self::build(file.as_deref().map(Path::new))
    }

    /// Load from an explicit file, still letting the environment override it.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation across every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
