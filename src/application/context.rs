//! Process-wide context shared by every component.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::AppConfig;
use crate::domain::foundation::Timestamp;

/// Service name reported by the info endpoint and the startup banner.
pub const SERVICE_NAME: &str = "Quora Automation Supervisor";

/// Built once by the supervisor and handed to each component.
///
/// Holds the configuration resolved at startup. Nothing downstream reads the
/// process environment again.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub config: Arc<AppConfig>,
    /// Distinguishes restarts of the same deployment in logs and status.
    pub instance_id: Uuid,
    pub started_at: Timestamp,
}

impl ServiceContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            instance_id: Uuid::new_v4(),
            started_at: Timestamp::now(),
        }
    }

    /// Seconds since the context was created, never negative.
    pub fn uptime_seconds(&self) -> u64 {
        Timestamp::now()
            .duration_since(&self.started_at)
            .num_seconds()
            .max(0) as u64
    }
}
