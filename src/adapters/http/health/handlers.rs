//! HTTP handlers for health endpoints.
//!
//! Handlers only read: the service context is immutable and scheduler
//! progress arrives through a `watch` receiver, so a request never waits on
//! the scheduler.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tokio::sync::watch;

use crate::application::{ServiceContext, SERVICE_NAME};
use crate::domain::cycle::CycleSnapshot;
use crate::domain::health::{HealthSnapshot, ServiceInfo};

use super::dto::{CycleStatusResponse, HealthResponse, ServiceInfoResponse};
use super::routes::{HEALTH_PATH, INFO_PATH, STATUS_PATH};

/// Application state for health endpoints.
#[derive(Clone)]
pub struct HealthAppState {
    /// Process-wide context (instance id, start time)
    pub context: Arc<ServiceContext>,
    /// Latest scheduler progress, published by the cycle scheduler
    pub status: watch::Receiver<CycleSnapshot>,
}

impl HealthAppState {
    pub fn new(context: Arc<ServiceContext>, status: watch::Receiver<CycleSnapshot>) -> Self {
        Self { context, status }
    }
}

/// Liveness probe.
///
/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::from(&HealthSnapshot::capture()))
}

/// Static self-description.
///
/// GET /
pub async fn service_info() -> Json<ServiceInfoResponse> {
    let endpoints = BTreeMap::from([
        ("health", HEALTH_PATH),
        ("info", INFO_PATH),
        ("status", STATUS_PATH),
    ]);
    Json(ServiceInfoResponse::from(ServiceInfo {
        service: SERVICE_NAME,
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    }))
}

/// Scheduler progress.
///
/// GET /api/status
pub async fn cycle_status(State(state): State<HealthAppState>) -> Json<CycleStatusResponse> {
    let snapshot = HealthSnapshot::capture().with_cycle(*state.status.borrow());

    Json(CycleStatusResponse::from_snapshot(&snapshot, &state.context))
}

/// Anything unrouted: 404 with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
