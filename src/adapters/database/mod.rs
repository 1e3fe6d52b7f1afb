//! Database adapters - connectivity probing via sqlx.

mod sqlx_probe;

pub use sqlx_probe::SqlxDependencyProbe;
