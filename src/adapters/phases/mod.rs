//! Phase adapters - implementations of the `PhaseExecutor` port.

mod simulated;

pub use simulated::SimulatedPhaseExecutor;
