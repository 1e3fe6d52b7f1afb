//! Dependency probe outcomes and the retry policy around them.

use std::time::Duration;

/// Outcome of a single connectivity attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Connected,
    /// Transport, authentication or protocol error, flattened to text.
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ProbeOutcome::Connected)
    }
}

/// How often and how many times the probe is retried.
///
/// `max_attempts = None` retries forever. Production deployments that want a
/// crash-loop signal from their orchestrator should set a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed wait between a failed attempt and the next one.
    pub delay: Duration,
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }

    pub fn bounded(delay: Duration, max_attempts: u32) -> Self {
        Self {
            delay,
            max_attempts: Some(max_attempts),
        }
    }

    /// Returns true if another attempt is allowed after `attempts` have run.
    pub fn allows_another(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::from_secs(10))
    }
}

/// Final result of the retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// `Connected`, or the last failure once the budget ran out.
    pub outcome: ProbeOutcome,
    pub attempts: u32,
}
