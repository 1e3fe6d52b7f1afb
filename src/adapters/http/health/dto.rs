//! Data transfer objects for health HTTP endpoints.

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::application::ServiceContext;
use crate::domain::cycle::SchedulerState;
use crate::domain::health::{HealthSnapshot, ServiceInfo};

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Response for `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process can answer
    pub status: &'static str,
    /// Unix epoch seconds
    pub timestamp: i64,
}

impl From<&HealthSnapshot> for HealthResponse {
    fn from(snapshot: &HealthSnapshot) -> Self {
        Self {
            status: snapshot.status.as_str(),
            timestamp: snapshot.timestamp.epoch_seconds(),
        }
    }
}

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    /// Endpoint name to path
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl From<ServiceInfo> for ServiceInfoResponse {
    fn from(info: ServiceInfo) -> Self {
        Self {
            service: info.service,
            status: info.status,
            version: info.version,
            endpoints: info.endpoints,
        }
    }
}

/// Response for `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct CycleStatusResponse {
    pub status: &'static str,
    pub instance_id: Uuid,
    pub uptime_seconds: u64,
    /// Finished cycles, including ones cut short by a phase failure
    pub cycles: u64,
    pub failed_cycles: u64,
    pub scheduler: SchedulerState,
    /// Unix epoch seconds of the scheduler's last state change
    pub last_heartbeat: i64,
    /// Unix epoch seconds
    pub timestamp: i64,
}

impl CycleStatusResponse {
    /// A snapshot captured without scheduler progress reports the initial
    /// idle state.
    pub fn from_snapshot(snapshot: &HealthSnapshot, context: &ServiceContext) -> Self {
        let cycle = snapshot.cycle.unwrap_or_default();
        Self {
            status: snapshot.status.as_str(),
            instance_id: context.instance_id,
            uptime_seconds: context.uptime_seconds(),
            cycles: cycle.cycles,
            failed_cycles: cycle.failed_cycles,
            scheduler: cycle.scheduler,
            last_heartbeat: cycle.last_heartbeat.epoch_seconds(),
            timestamp: snapshot.timestamp.epoch_seconds(),
        }
    }
}
