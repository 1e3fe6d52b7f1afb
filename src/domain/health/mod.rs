//! Health module - values produced for liveness and info requests.

mod snapshot;

pub use snapshot::{HealthSnapshot, HealthStatus, ServiceInfo};
