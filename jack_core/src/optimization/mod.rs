//! # Jack Cost Optimization
//!
//! Searches the six-variable design space for the cheapest jack that meets
//! every safety target and geometric feasibility check.
//!
//! - [`problem`] - cost objective, the ten inequality constraints, bounds
//! - [`solver`] - the [`NonlinearProgram`] / [`ConstrainedSolver`] boundary
//! - [`cobyla`] - derivative-free COBYLA backend
//!
//! A solve runs the backend once from the configured initial guess. A
//! failed or non-converged run is returned as-is with `success = false`;
//! callers that need a hard failure use [`OptimizationResult::require_success`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use jack_core::config::JackConfig;
//! use jack_core::optimization::solve;
//!
//! let result = solve(&JackConfig::default()).unwrap();
//! println!("{}: ${:.2}", result.message, result.cost_usd);
//! ```

pub mod cobyla;
pub mod problem;
pub mod solver;

use serde::{Deserialize, Serialize};

use crate::calculations::{safety_factors, SafetyResult};
use crate::config::JackConfig;
use crate::design::{DesignVector, DESIGN_VARIABLE_NAMES};
use crate::errors::{CalcError, CalcResult};

pub use self::cobyla::CobylaSolver;
pub use problem::{Constraint, ConstraintMargin, DesignProblem};
pub use solver::{ConstrainedSolver, NonlinearProgram, SolverOutcome};

/// Outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Converged and every constraint holds within tolerance
    pub success: bool,
    /// Final design
    pub design: DesignVector,
    /// Final design in optimizer order
    pub x: Vec<f64>,
    /// Material cost at the final design ($)
    pub cost_usd: f64,
    /// Human-readable summary of the run
    pub message: String,
    /// Raw backend status
    pub status: String,
    /// Objective evaluations used
    pub evaluations: usize,
    /// Every constraint at the final design
    pub margins: Vec<ConstraintMargin>,
    /// Full evaluation at the final design, when defined
    pub safety: Option<SafetyResult>,
}

impl OptimizationResult {
    /// Constraint with the most negative margin, if any is violated beyond `tolerance`
    pub fn worst_violation(&self, tolerance: f64) -> Option<&ConstraintMargin> {
        self.margins
            .iter()
            .filter(|m| !m.is_satisfied(tolerance))
            .min_by(|a, b| {
                let a = a.margin.unwrap_or(f64::NEG_INFINITY);
                let b = b.margin.unwrap_or(f64::NEG_INFINITY);
                a.total_cmp(&b)
            })
    }

    /// Turn an unsuccessful run into an error.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::SolverNonconvergence`] when `success` is false.
    pub fn require_success(self) -> CalcResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(CalcError::solver_nonconvergence(self.status.clone(), self.message.clone()))
        }
    }
}

/// Optimize with the default COBYLA backend configured from `config.solver`.
///
/// # Errors
///
/// Returns [`CalcError::InvalidInput`] for an invalid configuration. Solver
/// non-convergence is not an error; check [`OptimizationResult::success`].
pub fn solve(config: &JackConfig) -> CalcResult<OptimizationResult> {
    let backend = CobylaSolver::from_settings(&config.solver);
    solve_with(config, &backend)
}

/// Optimize with a caller-supplied backend.
pub fn solve_with(config: &JackConfig, backend: &dyn ConstrainedSolver) -> CalcResult<OptimizationResult> {
    config.validate()?;

    let problem = DesignProblem::new(config);
    let x0 = clamp_initial_guess(&problem.initial_guess(), &problem.bounds());

    log::debug!(
        "optimizing {} diagonal / {} crossbar under {} lbs with {}",
        config.materials.diagonal,
        config.materials.crossbar,
        config.load.force_lb,
        backend.name()
    );

    let outcome = backend.minimize(&problem, &x0)?;
    let design = DesignVector::from_slice(&outcome.x)?;
    let margins = problem.margins(&design);
    let tolerance = config.solver.feasibility_tolerance;
    let feasible = margins.iter().all(|m| m.is_satisfied(tolerance));
    let success = outcome.converged && feasible;

    let cost_usd = problem.objective(&design).unwrap_or(outcome.objective);
    let safety = safety_factors(&design, config).ok();

    let mut result = OptimizationResult {
        success,
        design,
        x: outcome.x,
        cost_usd,
        message: String::new(),
        status: outcome.status,
        evaluations: outcome.evaluations,
        margins,
        safety,
    };
    result.message = summarize(&result, outcome.converged, tolerance);

    if result.success {
        log::info!(
            "{} after {} evaluations, cost ${:.2}",
            result.message,
            result.evaluations,
            result.cost_usd
        );
    } else {
        log::warn!("{} after {} evaluations", result.message, result.evaluations);
    }
    Ok(result)
}

/// Clamp each coordinate of `x0` into its bound
fn clamp_initial_guess(x0: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    x0.iter()
        .zip(bounds)
        .enumerate()
        .map(|(index, (&value, &(lower, upper)))| {
            let clamped = value.clamp(lower, upper);
            if clamped != value {
                let name = DESIGN_VARIABLE_NAMES.get(index).copied().unwrap_or("x");
                log::warn!(
                    "initial {} = {} outside [{}, {}], using {}",
                    name,
                    value,
                    lower,
                    upper,
                    clamped
                );
            }
            clamped
        })
        .collect()
}

fn summarize(result: &OptimizationResult, converged: bool, tolerance: f64) -> String {
    let violation = result.worst_violation(tolerance).map(|m| match m.margin {
        Some(margin) => format!("{} violated by {:.3e}", m.constraint, -margin),
        None => format!("{} undefined", m.constraint),
    });
    match (converged, violation) {
        (true, None) => format!("Optimization terminated successfully ({})", result.status),
        (true, Some(violation)) => format!("Converged to an infeasible design ({}): {}", result.status, violation),
        (false, None) => format!("Solver did not converge ({})", result.status),
        (false, Some(violation)) => format!("Solver did not converge ({}): {}", result.status, violation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that returns a fixed point without searching
    struct FixedPoint {
        x: Vec<f64>,
        converged: bool,
    }

    impl ConstrainedSolver for FixedPoint {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn minimize(&self, problem: &dyn NonlinearProgram, _x0: &[f64]) -> CalcResult<SolverOutcome> {
            Ok(SolverOutcome {
                converged: self.converged,
                x: self.x.clone(),
                objective: problem.objective(&self.x),
                status: if self.converged { "FtolReached" } else { "MaxEvalReached" }.to_string(),
                evaluations: 1,
            })
        }
    }

    /// Backend that records the starting point it was given
    struct EchoStart;

    impl ConstrainedSolver for EchoStart {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn minimize(&self, problem: &dyn NonlinearProgram, x0: &[f64]) -> CalcResult<SolverOutcome> {
            Ok(SolverOutcome {
                converged: true,
                x: x0.to_vec(),
                objective: problem.objective(x0),
                status: "FtolReached".to_string(),
                evaluations: 1,
            })
        }
    }

    /// Heavy design satisfying every constraint under the default config
    fn feasible_point() -> Vec<f64> {
        vec![15.0, 3.0, 3.0, 0.5, 1.0, 0.75]
    }

    #[test]
    fn test_feasible_converged_run_succeeds() {
        let config = JackConfig::default();
        let backend = FixedPoint { x: feasible_point(), converged: true };
        let result = solve_with(&config, &backend).unwrap();
        assert!(result.success, "{}", result.message);
        assert!(result.worst_violation(1e-6).is_none());
        assert!(result.safety.as_ref().unwrap().passes(&config.targets));
        assert_eq!(result.x, feasible_point());
        assert!(result.clone().require_success().is_ok());
    }

    #[test]
    fn test_budget_exhaustion_is_failure() {
        let backend = FixedPoint { x: feasible_point(), converged: false };
        let result = solve_with(&JackConfig::default(), &backend).unwrap();
        assert!(!result.success);
        assert!(result.message.contains("MaxEvalReached"));
        match result.require_success() {
            Err(CalcError::SolverNonconvergence { status, .. }) => assert_eq!(status, "MaxEvalReached"),
            other => panic!("expected nonconvergence, got {:?}", other),
        }
    }

    #[test]
    fn test_infeasible_point_names_worst_constraint() {
        // Thin walls and a fat crossbar: wall clearance goes negative
        let backend = FixedPoint { x: vec![15.0, 0.5, 2.0, 0.05, 1.5, 0.75], converged: true };
        let result = solve_with(&JackConfig::default(), &backend).unwrap();
        assert!(!result.success);
        let worst = result.worst_violation(1e-6).unwrap();
        assert!(result.message.contains(worst.constraint.name()));
    }

    #[test]
    fn test_initial_guess_is_clamped_into_bounds() {
        let result = solve_with(&JackConfig::default(), &EchoStart).unwrap();
        // Hole offset 2 lies above its bound of 1
        assert_eq!(result.x, vec![15.0, 2.0, 2.0, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = JackConfig::default();
        config.load.force_lb = 0.0;
        let err = solve_with(&config, &EchoStart).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
