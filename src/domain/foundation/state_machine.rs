//! Transition checking for lifecycle enums.

use super::ValidationError;

/// A `Copy` enum with an explicit edge list.
///
/// Implementors declare which moves are legal; `transition_to` turns an
/// illegal move into a [`ValidationError`] instead of silently accepting it.
///
/// ```ignore
/// let state = SchedulerState::Idle.transition_to(SchedulerState::Running(Phase::first()))?;
/// assert!(SchedulerState::Stopped.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step. Must agree with `can_transition_to`.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Return `target` if the edge exists.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_transition(self, target));
        }
        Ok(target)
    }

    /// No outgoing edges.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
