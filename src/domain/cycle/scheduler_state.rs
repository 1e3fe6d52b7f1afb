//! SchedulerState enum for the cycle scheduler's lifecycle.

use serde::Serialize;
use std::fmt;

use super::Phase;
use crate::domain::foundation::StateMachine;

/// Where the cycle scheduler currently is.
///
/// ```text
/// Idle --> Running(first) --> Running(next) ... --> CycleComplete --> Idle
///   any non-terminal state --> Stopped
/// ```
///
/// A cycle cut short by a phase failure goes straight from `Running(_)` to
/// `CycleComplete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(tag = "state", content = "phase", rename_all = "snake_case")]
pub enum SchedulerState {
    #[default]
    Idle,
    Running(Phase),
    CycleComplete,
    Stopped,
}

impl SchedulerState {
    /// The phase currently executing, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            SchedulerState::Running(phase) => Some(*phase),
            _ => None,
        }
    }
}

impl StateMachine for SchedulerState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SchedulerState::*;
        match (self, target) {
            (Idle, Running(phase)) => *phase == Phase::first(),
            (Running(current), Running(next)) => current.next() == Some(*next),
            (Running(_), CycleComplete) => true,
            (CycleComplete, Idle) => true,
            (Idle | Running(_) | CycleComplete, Stopped) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SchedulerState::*;
        match self {
            Idle => vec![Running(Phase::first()), Stopped],
            Running(phase) => {
                let mut targets = Vec::with_capacity(3);
                if let Some(next) = phase.next() {
                    targets.push(Running(next));
                }
                targets.push(CycleComplete);
                targets.push(Stopped);
                targets
            }
            CycleComplete => vec![Idle, Stopped],
            Stopped => vec![],
        }
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerState::Idle => write!(f, "idle"),
            SchedulerState::Running(phase) => write!(f, "running:{}", phase),
            SchedulerState::CycleComplete => write!(f, "cycle_complete"),
            SchedulerState::Stopped => write!(f, "stopped"),
        }
    }
}
