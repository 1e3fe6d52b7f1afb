//! Outcome of the environment gate.

use std::fmt;

/// Why startup was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// The API credential is absent, blank, or a template value.
    MissingOrPlaceholderCredential,
    /// A typed setting failed semantic validation.
    InvalidSetting(String),
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::MissingOrPlaceholderCredential => {
                write!(f, "missing_or_placeholder_credential")
            }
            BlockReason::InvalidSetting(detail) => write!(f, "invalid_setting: {}", detail),
        }
    }
}

/// Result of validating the resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Ready,
    Blocked(BlockReason),
}

impl ValidationResult {
    /// Returns true if the process may proceed to the dependency probe.
    pub fn is_ready(&self) -> bool {
        matches!(self, ValidationResult::Ready)
    }
}
