//! Startup gate types: environment validation and dependency probing.

mod probe;
mod validation;

pub use probe::{ProbeOutcome, ProbeReport, RetryPolicy};
pub use validation::{BlockReason, ValidationResult};
