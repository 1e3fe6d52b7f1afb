//! PhaseExecutor port - Interface for the work behind each cycle phase.
//!
//! The scheduler sequences and times phases; what a phase actually does
//! (scraping, answer generation, posting, analytics) lives behind this port.

use async_trait::async_trait;

use crate::domain::cycle::Phase;
use crate::domain::foundation::DomainError;

/// Port for executing one phase of an automation cycle.
///
/// Implementations must ensure:
/// - Errors are returned, not panicked, so the scheduler can contain them
/// - The future is cancel-safe: the scheduler drops it on shutdown
#[async_trait]
pub trait PhaseExecutor: Send + Sync {
    /// Run `phase` as part of cycle number `cycle`.
    async fn execute(&self, cycle: u64, phase: Phase) -> Result<(), DomainError>;
}
