//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Database connect timeout must be positive")]
    InvalidConnectTimeout,

    #[error("Database retry delay must be positive")]
    InvalidRetryDelay,

    #[error("Database max_attempts must be at least 1 when set")]
    InvalidAttemptBudget,

    #[error("Scheduler {0} must be positive")]
    InvalidSchedulerDelay(&'static str),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
