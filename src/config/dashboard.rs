//! Operator dashboard configuration
//!
//! The dashboard runs outside this process. Only its address and the public
//! half of its static login are configured here, for the ready banner.

use serde::Deserialize;

/// Operator dashboard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_username")]
    pub username: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: default_username(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_username() -> String {
    "quora_user".to_string()
}
