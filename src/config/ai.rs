//! AI provider credential configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Template values shipped in example `.env` files. A key equal to any of
/// these was never filled in.
pub const PLACEHOLDER_API_KEYS: &[&str] = &[
    "sk-your-actual-key-here",
    "sk-your-actual-openai-key-here",
    "sk-your-openai-api-key",
    "your-api-key-here",
    "changeme",
];

/// AI provider configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiConfig {
    /// API key for the answer-generation provider
    pub api_key: Option<SecretString>,

    /// Additional deployment-specific placeholder values to reject (comma-separated)
    pub placeholder_keys: Option<String>,
}

impl AiConfig {
    /// Strip surrounding whitespace from the key once, at load time, so every
    /// consumer sees the same value the validator checked. A key that is
    /// only whitespace becomes absent.
    pub fn normalize(&mut self) {
        self.api_key = self.api_key.take().and_then(|key| {
            let trimmed = key.expose_secret().trim();
            (!trimmed.is_empty()).then(|| SecretString::new(trimmed.to_string()))
        });
    }

    /// Check if an API key is present and non-blank
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Get extra placeholder values as a vector
    pub fn placeholder_keys_list(&self) -> Vec<String> {
        self.placeholder_keys
            .as_ref()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Check if the configured key is one of the known template values
    pub fn is_placeholder(&self) -> bool {
        let Some(key) = self.api_key.as_ref() else {
            return false;
        };
        let key = key.expose_secret().trim();
        PLACEHOLDER_API_KEYS.contains(&key)
            || self.placeholder_keys_list().iter().any(|p| p == key)
    }
}
