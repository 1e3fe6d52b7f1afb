//! Startup gates: environment validation and dependency probing with retry.
//!
//! Both run sequentially on the supervisor's task before any concurrent
//! component starts.

use std::time::Duration;

use tokio::time;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::startup::{
    BlockReason, ProbeOutcome, ProbeReport, RetryPolicy, ValidationResult,
};
use crate::ports::DependencyProbe;

/// Decide whether the resolved configuration is startable.
///
/// Pure: no I/O, no logging. The credential must be present, non-blank and
/// not a known template value; every typed section must pass its semantic
/// validation.
pub fn validate_environment(config: &AppConfig) -> ValidationResult {
    if !config.ai.has_api_key() || config.ai.is_placeholder() {
        return ValidationResult::Blocked(BlockReason::MissingOrPlaceholderCredential);
    }
    if let Err(err) = config.validate() {
        return ValidationResult::Blocked(BlockReason::InvalidSetting(err.to_string()));
    }
    ValidationResult::Ready
}

/// Retry policy derived from the database section.
pub fn retry_policy(config: &AppConfig) -> RetryPolicy {
    RetryPolicy {
        delay: config.database.retry_delay(),
        max_attempts: config.database.max_attempts,
    }
}

/// Probe until the dependency answers or the attempt budget is spent.
///
/// Attempts are separated by exactly `policy.delay`. With an unbounded
/// policy this only returns once connected.
pub async fn probe_until_ready(probe: &dyn DependencyProbe, policy: RetryPolicy) -> ProbeReport {
    let target = probe.target();
    let mut attempts: u32 = 0;

    loop {
        attempts = attempts.saturating_add(1);
        match probe.probe().await {
            ProbeOutcome::Connected => {
                info!(attempt = attempts, target = %target, "Database connected successfully");
                return ProbeReport {
                    outcome: ProbeOutcome::Connected,
                    attempts,
                };
            }
            ProbeOutcome::Failed(detail) => {
                if !policy.allows_another(attempts) {
                    warn!(
                        attempt = attempts,
                        target = %target,
                        error = %detail,
                        "Database unavailable, retry budget exhausted"
                    );
                    return ProbeReport {
                        outcome: ProbeOutcome::Failed(detail),
                        attempts,
                    };
                }
                warn!(
                    attempt = attempts,
                    max_attempts = ?policy.max_attempts,
                    target = %target,
                    error = %detail,
                    retry_in_secs = policy.delay.as_secs_f64(),
                    "Database error, waiting for database to be ready"
                );
                time::sleep(policy.delay).await;
            }
        }
    }
}

/// Convenience for log fields.
pub(crate) fn describe_budget(max_attempts: Option<u32>, delay: Duration) -> String {
    match max_attempts {
        Some(max) => format!("{} attempts, {}s apart", max, delay.as_secs()),
        None => format!("unbounded, {}s apart", delay.as_secs()),
    }
}
