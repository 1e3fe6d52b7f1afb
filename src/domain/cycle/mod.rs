//! Cycle module - the phase sequence and the scheduler's progress model.

mod cycle_state;
mod phase;
mod scheduler_state;

pub use cycle_state::{CycleSnapshot, CycleState};
pub use phase::Phase;
pub use scheduler_state::SchedulerState;
