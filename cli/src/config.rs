//! Configuration management for the harvest management CLI
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with HM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Local file storage configuration
    pub storage: StorageConfig,

    /// Database credential configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the JSON working-set file
    pub data_file: String,

    /// Path of the exported plain-text report
    pub report_file: String,
}

/// Database credentials, all optional.
///
/// Whatever is missing here is prompted for interactively before the first
/// sync; nothing in this section is required to run the CLI offline.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Endpoint in host:port/dbname form (port optional)
    pub endpoint: Option<String>,

    /// Database user
    pub username: Option<String>,

    /// Database password
    pub password: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("HM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("storage.data_file", "harvest_data.json")?
            .set_default("storage.report_file", "harvest_report.txt")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (HM_ prefix)
            .add_source(
                Environment::with_prefix("HM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
