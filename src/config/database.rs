//! Database configuration
//!
//! The datastore is only probed for connectivity before the supervisor enters
//! service; nothing is read or written.

use secrecy::SecretString;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// Relational backend the dependency probe connects to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Mysql,
    Postgres,
}

impl DatabaseBackend {
    /// Well-known port for the backend
    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseBackend::Mysql => 3306,
            DatabaseBackend::Postgres => 5432,
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DatabaseBackend::Mysql => "mysql",
            DatabaseBackend::Postgres => "postgres",
        };
        write!(f, "{}", s)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Which wire protocol to speak
    #[serde(default)]
    pub backend: DatabaseBackend,

    #[serde(default = "default_host")]
    pub host: String,

    /// Port override; the backend's well-known port when unset
    pub port: Option<u16>,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: SecretString,

    /// Database (schema) name
    #[serde(default = "default_name")]
    pub name: String,

    /// Per-attempt connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Fixed delay between probe attempts in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Probe attempt budget; unbounded when unset
    pub max_attempts: Option<u32>,
}

impl DatabaseConfig {
    /// Port the probe connects to
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.backend.default_port())
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Get retry delay as Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// `backend://host:port/name`, safe to log
    pub fn display_target(&self) -> String {
        format!("{}://{}:{}/{}", self.backend, self.host, self.effective_port(), self.name)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == Some(0) {
            return Err(ValidationError::InvalidPort);
        }
        if self.connect_timeout_secs == 0 {
            return Err(ValidationError::InvalidConnectTimeout);
        }
        if self.retry_delay_secs == 0 {
            return Err(ValidationError::InvalidRetryDelay);
        }
        if self.max_attempts == Some(0) {
            return Err(ValidationError::InvalidAttemptBudget);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            host: default_host(),
            port: None,
            user: default_user(),
            password: default_password(),
            name: default_name(),
            connect_timeout_secs: default_connect_timeout(),
            retry_delay_secs: default_retry_delay(),
            max_attempts: None,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_user() -> String {
    "root".to_string()
}

fn default_password() -> SecretString {
    SecretString::new(String::new())
}

fn default_name() -> String {
    "quora_automation".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_retry_delay() -> u64 {
    10
}
