//! Boundary between a problem formulation and the solver that minimizes it.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

/// A bound-constrained nonlinear program with inequality constraints.
///
/// Constraints follow the `g(x) ≥ 0` convention. Implementations must be
/// total: when the underlying model is undefined at `x` they return a
/// penalty value instead of failing, so a solver can keep probing.
pub trait NonlinearProgram {
    /// Number of design variables
    fn dimension(&self) -> usize;

    /// Value to minimize at `x`
    fn objective(&self, x: &[f64]) -> f64;

    /// Number of inequality constraints
    fn constraint_count(&self) -> usize;

    /// Identifier of constraint `index`, for diagnostics
    fn constraint_name(&self, index: usize) -> &'static str;

    /// Value of constraint `index` at `x`; satisfied when ≥ 0
    fn constraint(&self, index: usize, x: &[f64]) -> f64;

    /// Closed `(min, max)` interval per variable
    fn bounds(&self) -> Vec<(f64, f64)>;

    /// Starting point
    fn initial_guess(&self) -> Vec<f64>;
}

/// Raw answer of a solver backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOutcome {
    /// Backend reported convergence (not budget exhaustion or failure)
    pub converged: bool,
    /// Final point
    pub x: Vec<f64>,
    /// Objective at `x`
    pub objective: f64,
    /// Backend status, e.g. `FtolReached`
    pub status: String,
    /// Objective evaluations used
    pub evaluations: usize,
}

/// A derivative-free constrained minimizer.
pub trait ConstrainedSolver {
    /// Backend name for logs and reports
    fn name(&self) -> &'static str;

    /// Minimize `problem` starting from `x0`.
    ///
    /// A non-converged run is still an `Ok` outcome; `Err` is reserved for
    /// requests the backend cannot attempt at all.
    fn minimize(&self, problem: &dyn NonlinearProgram, x0: &[f64]) -> CalcResult<SolverOutcome>;
}
