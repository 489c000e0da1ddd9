//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TAMM_API` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use tamm_api::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod content;
mod database;
mod error;
mod kofi;
mod server;
mod site;
mod supabase;

pub use content::ContentConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use kofi::KofiConfig;
pub use server::{Environment, ServerConfig};
pub use site::SiteConfig;
pub use supabase::SupabaseConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Public site/API origins and cookie secret
    pub site: SiteConfig,

    /// Supabase auth + members table
    pub supabase: SupabaseConfig,

    /// Ko-fi webhook
    pub kofi: KofiConfig,

    /// Blog post database. Blog routes are not mounted without it.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Protected content directory
    #[serde(default)]
    pub content: ContentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TAMM_API` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TAMM_API__SERVER__PORT=8787` -> `server.port = 8787`
    /// - `TAMM_API__SUPABASE__URL=...` -> `supabase.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TAMM_API")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.site.validate(environment)?;
        self.supabase.validate(environment)?;
        self.kofi.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.content.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
