//! Application layer - startup gates, the cycle scheduler and the supervisor
//! that wires them together.
//!
//! This layer orchestrates domain types through ports; it never talks to a
//! datastore or socket directly.

mod context;
mod scheduler;
mod startup;
mod supervisor;

pub use context::{ServiceContext, SERVICE_NAME};
pub use scheduler::{CycleScheduler, CycleSchedulerConfig};
pub use startup::{probe_until_ready, retry_policy, validate_environment};
pub use supervisor::{Supervisor, SupervisorError};
