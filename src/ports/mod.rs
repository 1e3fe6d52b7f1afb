//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the supervisor and the outside world. Adapters implement these ports.
//!
//! - `DependencyProbe` - One-shot datastore connectivity check
//! - `PhaseExecutor` - The work performed by each cycle phase

mod dependency_probe;
mod phase_executor;

pub use dependency_probe::DependencyProbe;
pub use phase_executor::PhaseExecutor;
