//! DependencyProbe port - Interface for one-shot datastore connectivity checks.
//!
//! The supervisor refuses to enter service until the datastore answers. The
//! probe only connects and disconnects; it never runs a query.

use async_trait::async_trait;

use crate::domain::startup::ProbeOutcome;

/// Port for checking that an external datastore is reachable.
///
/// Implementations must ensure:
/// - Exactly one connection is attempted per call
/// - Any connection opened is released before returning, on every path
/// - Transport, authentication and protocol errors come back as
///   `ProbeOutcome::Failed`, never as a panic
///
/// # Example
///
/// ```ignore
/// match probe.probe().await {
///     ProbeOutcome::Connected => info!("Database connected"),
///     ProbeOutcome::Failed(detail) => warn!(%detail, "Database unavailable"),
/// }
/// ```
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// Attempt a single connect-and-close.
    async fn probe(&self) -> ProbeOutcome;

    /// Human-readable target for log lines. Must not contain credentials.
    fn target(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn DependencyProbe) {}

    struct AlwaysUp;

    #[async_trait]
    impl DependencyProbe for AlwaysUp {
        async fn probe(&self) -> ProbeOutcome {
            ProbeOutcome::Connected
        }

        fn target(&self) -> String {
            "memory://".to_string()
        }
    }

    #[tokio::test]
    async fn probe_is_callable_through_trait_object() {
        let probe: Box<dyn DependencyProbe> = Box::new(AlwaysUp);
        assert!(probe.probe().await.is_connected());
        assert_eq!(probe.target(), "memory://");
    }
}
