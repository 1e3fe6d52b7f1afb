//! SimulatedPhaseExecutor - stands in for the real pipeline subsystems.
//!
//! Each phase is a fixed delay. The scraping, answer-generation, posting and
//! analytics subsystems plug in behind the same `PhaseExecutor` port.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time;
use tracing::debug;

use crate::domain::cycle::Phase;
use crate::domain::foundation::DomainError;
use crate::ports::PhaseExecutor;

/// Executor whose phases only take time.
#[derive(Debug, Clone)]
pub struct SimulatedPhaseExecutor {
    delay: Duration,
}

impl SimulatedPhaseExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PhaseExecutor for SimulatedPhaseExecutor {
    async fn execute(&self, cycle: u64, phase: Phase) -> Result<(), DomainError> {
        debug!(cycle, phase = %phase, delay_ms = self.delay.as_millis() as u64, "Simulating phase");
        time::sleep(self.delay).await;
        Ok(())
    }
}
