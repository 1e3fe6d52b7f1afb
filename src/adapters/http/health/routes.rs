//! Axum router configuration for health endpoints.

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::timeout::TimeoutLayer;

use super::handlers::{cycle_status, health, not_found, service_info, HealthAppState};

/// Liveness endpoint polled by orchestrators.
pub const HEALTH_PATH: &str = "/api/health";
/// Scheduler progress endpoint.
pub const STATUS_PATH: &str = "/api/status";
/// Service description.
pub const INFO_PATH: &str = "/";

/// Create the health API routes.
///
/// # Routes
///
/// - `GET /` - Service name, status and endpoint map
/// - `GET /api/health` - `{"status": "healthy", "timestamp": <epoch seconds>}`
/// - `GET /api/status` - Latest published scheduler snapshot
///
/// Everything else answers 404 with an empty body. No request tracing layer
/// is installed; orchestrator polling would drown the scheduler's log lines.
pub fn health_routes() -> Router<HealthAppState> {
    Router::new()
        .route(INFO_PATH, get(service_info))
        .route(HEALTH_PATH, get(health))
        .route(STATUS_PATH, get(cycle_status))
        .fallback(not_found)
}

/// Create the complete health router with state and request timeout applied.
pub fn health_router(state: HealthAppState, request_timeout: Duration) -> Router {
    health_routes()
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
