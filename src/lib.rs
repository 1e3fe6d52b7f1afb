//! Automation Supervisor - process supervisor and cycle scheduler
//!
//! Gates startup on a valid API credential and a reachable database, serves a
//! liveness endpoint, and drives the four-phase automation cycle on a fixed
//! cadence until interrupted.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
