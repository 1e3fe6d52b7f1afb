//! HTTP adapters - the health service exposed to orchestration platforms.

pub mod health;
mod server;

pub use health::{health_router, HealthAppState};
pub use server::{HealthServer, HealthServerHandle};
