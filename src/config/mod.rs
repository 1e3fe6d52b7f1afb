//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `AUTOMATION` prefix and nested values use double underscores as separators.
//!
//! Configuration is resolved exactly once, at process start, and shared as an
//! immutable `Arc<AppConfig>`. Changing the environment afterwards has no effect.
//!
//! # Example
//!
//! ```no_run
//! use automation_supervisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Health server on {}", config.server.socket_addr());
//! ```

mod ai;
mod dashboard;
mod database;
mod error;
mod logging;
mod scheduler;
mod server;

pub use ai::{AiConfig, PLACEHOLDER_API_KEYS};
pub use dashboard::DashboardConfig;
pub use database::{DatabaseBackend, DatabaseConfig};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use scheduler::{PhaseFailurePolicy, SchedulerConfig};
pub use server::ServerConfig;

use serde::Deserialize;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "AUTOMATION";

/// Root application configuration
///
/// Every section has documented defaults; the only setting startup cannot do
/// without is `ai.api_key`, which the environment validator checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Answer-generation credential
    #[serde(default)]
    pub ai: AiConfig,

    /// Datastore probed before entering service
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Health server (host, port, request timeout)
    #[serde(default)]
    pub server: ServerConfig,

    /// Cycle cadence and failure policy
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Log verbosity and destination
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Operator dashboard advertised in the ready banner
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `AUTOMATION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `AUTOMATION__AI__API_KEY=sk-...` -> `ai.api_key = ...`
    /// - `AUTOMATION__DATABASE__HOST=db` -> `database.host = db`
    /// - `AUTOMATION__SERVER__PORT=5000` -> `server.port = 5000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from the process environment only, skipping `.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<AppConfig>()?;
        config.ai.normalize();

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of the typed sections. The credential is
    /// not checked here; that is the environment validator's job.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.scheduler.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
