//! # Jack Calculations
//!
//! Each calculation takes a typed input and returns a serializable result
//! through a pure function:
//!
//! - [`safety`] - `safety_factors(design, config) -> SafetyResult`
//! - [`capacity`] - `calculate(input) -> CapacityResult` (failure load table)

pub mod capacity;
pub mod safety;

// Re-export commonly used types
pub use capacity::{CapacityInput, CapacityResult, CapacityRow, FailureStrengths};
pub use safety::{safety_factors, FailureMode, SafetyResult};
