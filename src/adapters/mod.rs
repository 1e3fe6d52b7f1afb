//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the supervisor to external systems:
//! - `database` - sqlx connectivity probe for MySQL / PostgreSQL
//! - `phases` - phase executors (simulated placeholder)
//! - `http` - axum health service

pub mod database;
pub mod http;
pub mod phases;

pub use database::SqlxDependencyProbe;
pub use http::{health_router, HealthAppState, HealthServer, HealthServerHandle};
pub use phases::SimulatedPhaseExecutor;
