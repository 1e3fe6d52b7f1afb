//! Cycle scheduler configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// What the scheduler does with the rest of a cycle after a phase fails
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhaseFailurePolicy {
    /// Skip the remaining phases and wait for the next cycle
    #[default]
    AbandonCycle,
    /// Log the failure and run the remaining phases anyway
    ContinuePhases,
}

/// Cycle scheduler configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Duration of each placeholder phase step in seconds
    #[serde(default = "default_phase_delay")]
    pub phase_delay_secs: u64,

    /// Wait between the end of one cycle and the start of the next, in seconds
    #[serde(default = "default_cycle_interval")]
    pub cycle_interval_secs: u64,

    #[serde(default)]
    pub failure_policy: PhaseFailurePolicy,
}

impl SchedulerConfig {
    /// Get phase delay as Duration
    pub fn phase_delay(&self) -> Duration {
        Duration::from_secs(self.phase_delay_secs)
    }

    /// Get inter-cycle interval as Duration
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.phase_delay_secs == 0 {
            return Err(ValidationError::InvalidSchedulerDelay("phase_delay_secs"));
        }
        if self.cycle_interval_secs == 0 {
            return Err(ValidationError::InvalidSchedulerDelay("cycle_interval_secs"));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            phase_delay_secs: default_phase_delay(),
            cycle_interval_secs: default_cycle_interval(),
            failure_policy: PhaseFailurePolicy::default(),
        }
    }
}

fn default_phase_delay() -> u64 {
    2
}

fn default_cycle_interval() -> u64 {
    30
}
