//! Domain layer containing the supervisor's value types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamp, state machine, errors)
//! - `startup` - Environment validation and dependency probe outcomes
//! - `cycle` - Phase sequence, scheduler state machine and cycle progress
//! - `health` - Liveness and service-info values

pub mod cycle;
pub mod foundation;
pub mod health;
pub mod startup;
