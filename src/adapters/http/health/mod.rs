//! Health HTTP adapter - liveness and info endpoints for orchestrators.
//!
//! Provides endpoints for:
//! - Liveness (`/api/health`)
//! - Service description (`/`)
//! - Scheduler progress (`/api/status`)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::HealthAppState;
pub use routes::{health_router, HEALTH_PATH, INFO_PATH, STATUS_PATH};
