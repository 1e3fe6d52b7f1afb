//! Foundation module - Shared domain primitives.
//!
//! Contains the timestamp value object, the state machine trait and the
//! error types used across the supervisor's domain.

mod errors;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
