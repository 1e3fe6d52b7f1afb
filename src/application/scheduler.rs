//! CycleScheduler - the supervisor's main control loop.
//!
//! Runs the fixed phase sequence, waits the inter-cycle interval, and repeats
//! until the shutdown channel flips to `true`.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `cycle_interval` | 30s | Wait between the end of one cycle and the next |
//! | `failure_policy` | abandon cycle | What to do after a phase error |
//!
//! ## Cancellation
//!
//! The shutdown channel is checked at every phase boundary, and both phase
//! execution and the inter-cycle wait race it, so the loop exits as soon as
//! the signal arrives. A dropped sender counts as a shutdown request.
//!
//! ## Publication
//!
//! Progress is published on a `watch` channel after every state change. The
//! scheduler is the only writer; readers take copies with `borrow()`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{error, info, warn};

use crate::config::{PhaseFailurePolicy, SchedulerConfig};
use crate::domain::cycle::{CycleSnapshot, CycleState, Phase};
use crate::domain::foundation::ValidationError;
use crate::ports::PhaseExecutor;

/// Configuration for the CycleScheduler.
#[derive(Debug, Clone)]
pub struct CycleSchedulerConfig {
    /// Wait after each cycle before the next one starts.
    pub cycle_interval: Duration,

    pub failure_policy: PhaseFailurePolicy,
}

impl Default for CycleSchedulerConfig {
    fn default() -> Self {
        Self::from(&SchedulerConfig::default())
    }
}

impl From<&SchedulerConfig> for CycleSchedulerConfig {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            cycle_interval: config.cycle_interval(),
            failure_policy: config.failure_policy,
        }
    }
}

impl CycleSchedulerConfig {
    /// Create config with custom inter-cycle interval.
    pub fn with_cycle_interval(mut self, interval: Duration) -> Self {
        self.cycle_interval = interval;
        self
    }

    /// Create config with custom failure policy.
    pub fn with_failure_policy(mut self, policy: PhaseFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// How a single cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleEnd {
    Finished,
    Cancelled,
}

/// Sequences phases on a fixed cadence.
pub struct CycleScheduler {
    executor: Arc<dyn PhaseExecutor>,
    config: CycleSchedulerConfig,
    state: CycleState,
    status: watch::Sender<CycleSnapshot>,
}

impl CycleScheduler {
    /// Create a new scheduler with default configuration.
    pub fn new(executor: Arc<dyn PhaseExecutor>) -> Self {
        Self::with_config(executor, CycleSchedulerConfig::default())
    }

    /// Create a new scheduler with custom configuration.
    pub fn with_config(executor: Arc<dyn PhaseExecutor>, config: CycleSchedulerConfig) -> Self {
        let state = CycleState::new();
        let (status, _) = watch::channel(state.snapshot());
        Self {
            executor,
            config,
            state,
            status,
        }
    }

    /// Read handle on the published progress.
    pub fn subscribe(&self) -> watch::Receiver<CycleSnapshot> {
        self.status.subscribe()
    }

    /// Run the cycle loop until a shutdown signal is received.
    ///
    /// Returns the final snapshot, with the scheduler in the `Stopped` state.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> CycleSnapshot {
        info!(
            interval_secs = self.config.cycle_interval.as_secs_f64(),
            policy = ?self.config.failure_policy,
            "Cycle scheduler started"
        );

        loop {
            if is_cancelled(&shutdown) {
                break;
            }

            match self.run_cycle(&mut shutdown).await {
                Ok(CycleEnd::Finished) => {}
                Ok(CycleEnd::Cancelled) => break,
                Err(err) => {
                    error!(error = %err, "Scheduler state machine rejected a transition, stopping");
                    break;
                }
            }

            // Between cycles the published state is idle, never cycle_complete
            if let Err(err) = self.state.rest() {
                error!(error = %err, "Scheduler state machine rejected a transition, stopping");
                break;
            }
            self.publish();

            info!(
                next_cycle = self.state.current_cycle(),
                wait_secs = self.config.cycle_interval.as_secs_f64(),
                "Next cycle scheduled"
            );
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break,
                _ = time::sleep(self.config.cycle_interval) => {}
            }
        }

        self.state.stop();
        self.publish();
        info!(
            cycles = self.state.cycles(),
            failed_cycles = self.state.failed_cycles(),
            "System stopped"
        );
        self.state.snapshot()
    }

    async fn run_cycle(
        &mut self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<CycleEnd, ValidationError> {
        let cycle = self.state.current_cycle();
        info!(cycle, "Automation cycle #{} started", cycle);

        for phase in Phase::ALL {
            if is_cancelled(shutdown) {
                return Ok(CycleEnd::Cancelled);
            }

            self.state.begin_phase(phase)?;
            self.publish();
            info!(
                cycle,
                phase = %phase,
                "Phase {}/{}: {}...",
                phase.ordinal(),
                Phase::ALL.len(),
                phase.description()
            );

            let started = Instant::now();
            let result = tokio::select! {
                _ = shutdown_requested(shutdown) => return Ok(CycleEnd::Cancelled),
                result = self.executor.execute(cycle, phase) => result,
            };

            match result {
                Ok(()) => {
                    info!(
                        cycle,
                        phase = %phase,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Phase completed"
                    );
                }
                Err(err) => {
                    self.state.record_phase_failure();
                    error!(cycle, phase = %phase, code = %err.code, error = %err, "Phase failed");
                    if self.config.failure_policy == PhaseFailurePolicy::AbandonCycle {
                        warn!(cycle, phase = %phase, "Abandoning remaining phases of this cycle");
                        break;
                    }
                }
            }
        }

        let failed_before = self.state.failed_cycles();
        let finished = self.state.finish_cycle()?;
        self.publish();
        if self.state.failed_cycles() > failed_before {
            warn!(cycle = finished, "Cycle #{} finished with failures", finished);
        } else {
            info!(cycle = finished, "Cycle #{} completed successfully", finished);
        }
        Ok(CycleEnd::Finished)
    }

    fn publish(&self) {
        self.status.send_replace(self.state.snapshot());
    }
}

fn is_cancelled(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}

/// Resolves once shutdown is requested or the sender is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
