//! HealthSnapshot and ServiceInfo value objects.
//!
//! Both are built fresh for every request and never cached.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::cycle::CycleSnapshot;
use crate::domain::foundation::Timestamp;

/// Liveness status reported to orchestrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answer to a liveness request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub timestamp: Timestamp,
    /// Latest scheduler progress, when the caller asked for it.
    pub cycle: Option<CycleSnapshot>,
}

impl HealthSnapshot {
    /// A process that can answer is alive; liveness never depends on the
    /// scheduler's progress.
    pub fn capture() -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp: Timestamp::now(),
            cycle: None,
        }
    }

    pub fn with_cycle(mut self, cycle: CycleSnapshot) -> Self {
        self.cycle = Some(cycle);
        self
    }
}

/// Static self-description served at the root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    /// Endpoint name to path.
    pub endpoints: BTreeMap<&'static str, &'static str>,
}
