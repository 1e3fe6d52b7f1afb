//! CycleState - the scheduler's private progress record, and the read-only
//! snapshot it publishes for other components.

use serde::Serialize;

use super::{Phase, SchedulerState};
use crate::domain::foundation::{StateMachine, Timestamp, ValidationError};

/// Mutable progress of the cycle scheduler.
///
/// Owned exclusively by the scheduler. Other components only ever see a
/// [`CycleSnapshot`]. `cycles` counts every cycle that was started and then
/// finished, whether or not a phase failed, and never decreases.
#[derive(Debug, Clone)]
pub struct CycleState {
    cycles: u64,
    failed_cycles: u64,
    state: SchedulerState,
    current_failed: bool,
    last_heartbeat: Timestamp,
}

impl CycleState {
    pub fn new() -> Self {
        Self {
            cycles: 0,
            failed_cycles: 0,
            state: SchedulerState::Idle,
            current_failed: false,
            last_heartbeat: Timestamp::now(),
        }
    }

    /// Number of finished cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Number of finished cycles in which at least one phase failed.
    pub fn failed_cycles(&self) -> u64 {
        self.failed_cycles
    }

    /// 1-based number of the cycle in progress (or about to start).
    pub fn current_cycle(&self) -> u64 {
        self.cycles + 1
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn last_heartbeat(&self) -> Timestamp {
        self.last_heartbeat
    }

    /// Enter `phase`. Must be the first phase from idle, or the successor of
    /// the phase currently running.
    pub fn begin_phase(&mut self, phase: Phase) -> Result<(), ValidationError> {
        self.advance(SchedulerState::Running(phase))
    }

    /// Mark the cycle in progress as having a failed phase.
    pub fn record_phase_failure(&mut self) {
        self.current_failed = true;
        self.last_heartbeat = Timestamp::now();
    }

    /// Close the cycle in progress and bump the counter. Returns the number
    /// of the cycle just finished.
    pub fn finish_cycle(&mut self) -> Result<u64, ValidationError> {
        self.advance(SchedulerState::CycleComplete)?;
        self.cycles = self.cycles.saturating_add(1);
        if std::mem::take(&mut self.current_failed) {
            self.failed_cycles = self.failed_cycles.saturating_add(1);
        }
        Ok(self.cycles)
    }

    /// Return to idle for the inter-cycle wait.
    pub fn rest(&mut self) -> Result<(), ValidationError> {
        self.advance(SchedulerState::Idle)
    }

    /// Enter the terminal state. Stopping twice is a no-op.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            self.state = SchedulerState::Stopped;
            self.last_heartbeat = Timestamp::now();
        }
    }

    /// Immutable copy for publication.
    pub fn snapshot(&self) -> CycleSnapshot {
        CycleSnapshot {
            cycles: self.cycles,
            failed_cycles: self.failed_cycles,
            scheduler: self.state,
            last_heartbeat: self.last_heartbeat,
        }
    }

    fn advance(&mut self, target: SchedulerState) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(target)?;
        self.last_heartbeat = Timestamp::now();
        Ok(())
    }
}

impl Default for CycleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the scheduler, safe to share across tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleSnapshot {
    pub cycles: u64,
    pub failed_cycles: u64,
    pub scheduler: SchedulerState,
    pub last_heartbeat: Timestamp,
}

impl Default for CycleSnapshot {
    fn default() -> Self {
        CycleState::new().snapshot()
    }
}
