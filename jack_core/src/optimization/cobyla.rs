//! COBYLA backend (Constrained Optimization BY Linear Approximations).
//!
//! Wraps the pure-Rust [`cobyla`] crate. The method is derivative-free,
//! honors box bounds directly and treats each constraint as `g(x) ≥ 0`.

use std::cell::Cell;

use ::cobyla::{minimize, FailStatus, Func, RhoBeg, StopTols, SuccessStatus};

use crate::config::SolverSettings;
use crate::errors::{CalcError, CalcResult};

use super::solver::{ConstrainedSolver, NonlinearProgram, SolverOutcome};

/// COBYLA with a fixed evaluation budget and stopping tolerances.
#[derive(Debug, Clone, PartialEq)]
pub struct CobylaSolver {
    /// Objective evaluation budget
    pub max_evaluations: usize,
    /// Initial trust-region radius
    pub initial_step: f64,
    /// Relative tolerance on the objective
    pub ftol_rel: f64,
    /// Relative tolerance on the variables
    pub xtol_rel: f64,
}

impl CobylaSolver {
    /// Backend configured from the solver section of a [`JackConfig`](crate::config::JackConfig)
    pub fn from_settings(settings: &SolverSettings) -> Self {
        CobylaSolver {
            max_evaluations: settings.max_evaluations,
            initial_step: settings.initial_step,
            ftol_rel: settings.ftol_rel,
            xtol_rel: settings.xtol_rel,
        }
    }
}

impl Default for CobylaSolver {
    fn default() -> Self {
        CobylaSolver::from_settings(&SolverSettings::default())
    }
}

type BoxedConstraint<'a> = Box<dyn Fn(&[f64], &mut ()) -> f64 + 'a>;

fn success_converged(status: &SuccessStatus) -> bool {
    !matches!(status, SuccessStatus::MaxEvalReached | SuccessStatus::MaxTimeReached)
}

/// Names of the constraints with a negative value at `x`
fn violated_constraints(problem: &dyn NonlinearProgram, x: &[f64]) -> Vec<&'static str> {
    (0..problem.constraint_count())
        .filter(|&index| problem.constraint(index, x) < 0.0)
        .map(|index| problem.constraint_name(index))
        .collect()
}

impl ConstrainedSolver for CobylaSolver {
    fn name(&self) -> &'static str {
        "COBYLA"
    }

    fn minimize(&self, problem: &dyn NonlinearProgram, x0: &[f64]) -> CalcResult<SolverOutcome> {
        let bounds = problem.bounds();
        if x0.len() != problem.dimension() || bounds.len() != problem.dimension() {
            return Err(CalcError::invalid_input(
                "initial_guess",
                format!("{:?}", x0),
                format!("Expected {} values with matching bounds", problem.dimension()),
            ));
        }

        let evaluations = Cell::new(0_usize);
        let objective = |x: &[f64], _: &mut ()| {
            evaluations.set(evaluations.get() + 1);
            problem.objective(x)
        };

        let constraints: Vec<BoxedConstraint<'_>> = (0..problem.constraint_count())
            .map(|index| Box::new(move |x: &[f64], _: &mut ()| problem.constraint(index, x)) as BoxedConstraint<'_>)
            .collect();
        let cons: Vec<&dyn Func<()>> = constraints.iter().map(|c| c as &dyn Func<()>).collect();

        let stop_tols = StopTols {
            ftol_rel: self.ftol_rel,
            xtol_rel: self.xtol_rel,
            ..StopTols::default()
        };

        log::debug!(
            "{}: {} variables, {} constraints, budget {}",
            self.name(),
            problem.dimension(),
            problem.constraint_count(),
            self.max_evaluations
        );

        let outcome = match minimize(
            objective,
            x0,
            &bounds,
            &cons,
            (),
            self.max_evaluations,
            RhoBeg::All(self.initial_step),
            Some(stop_tols),
        ) {
            Ok((status, x, fun)) => SolverOutcome {
                converged: success_converged(&status),
                x,
                objective: fun,
                status: format!("{:?}", status),
                evaluations: evaluations.get(),
            },
            Err((status, x, fun)) => {
                if matches!(status, FailStatus::InvalidArgs) {
                    return Err(CalcError::invalid_input(
                        "solver",
                        format!("{:?}", x0),
                        "COBYLA rejected the problem arguments",
                    ));
                }
                SolverOutcome {
                    converged: false,
                    x,
                    objective: fun,
                    status: format!("{:?}", status),
                    evaluations: evaluations.get(),
                }
            }
        };

        log::debug!(
            "{} finished with {} after {} evaluations",
            self.name(),
            outcome.status,
            outcome.evaluations
        );
        for index in 0..problem.constraint_count() {
            log::trace!(
                "  {} = {:.6e}",
                problem.constraint_name(index),
                problem.constraint(index, &outcome.x)
            );
        }
        let violated = violated_constraints(problem, &outcome.x);
        if !violated.is_empty() {
            log::debug!("{} final point violates {}", self.name(), violated.join(", "));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Minimize (x0 − 3)² + (x1 − 2)² subject to x0 + x1 ≤ 4
    struct Paraboloid;

    impl NonlinearProgram for Paraboloid {
        fn dimension(&self) -> usize {
            2
        }

        fn objective(&self, x: &[f64]) -> f64 {
            (x[0] - 3.0).powi(2) + (x[1] - 2.0).powi(2)
        }

        fn constraint_count(&self) -> usize {
            1
        }

        fn constraint_name(&self, _index: usize) -> &'static str {
            "sum_limit"
        }

        fn constraint(&self, _index: usize, x: &[f64]) -> f64 {
            4.0 - x[0] - x[1]
        }

        fn bounds(&self) -> Vec<(f64, f64)> {
            vec![(0.0, 10.0), (0.0, 10.0)]
        }

        fn initial_guess(&self) -> Vec<f64> {
            vec![1.0, 1.0]
        }
    }

    #[test]
    fn test_constrained_paraboloid() {
        let solver = CobylaSolver {
            max_evaluations: 500,
            initial_step: 0.5,
            ftol_rel: 1e-10,
            xtol_rel: 1e-10,
        };
        let outcome = solver.minimize(&Paraboloid, &Paraboloid.initial_guess()).unwrap();
        assert!(outcome.converged, "status: {}", outcome.status);
        // Projection of (3, 2) onto x0 + x1 = 4
        assert_abs_diff_eq!(outcome.x[0], 2.5, epsilon = 1e-3);
        assert_abs_diff_eq!(outcome.x[1], 1.5, epsilon = 1e-3);
        assert!(outcome.evaluations > 0 && outcome.evaluations <= 500);
    }

    #[test]
    fn test_budget_exhaustion_is_not_convergence() {
        let solver = CobylaSolver {
            max_evaluations: 10,
            initial_step: 0.5,
            ftol_rel: 1e-14,
            xtol_rel: 1e-14,
        };
        let outcome = solver.minimize(&Paraboloid, &Paraboloid.initial_guess()).unwrap();
        assert!(!outcome.converged);
        assert_eq!(outcome.status, "MaxEvalReached");
    }

    #[test]
    fn test_violated_constraints_are_named() {
        assert_eq!(violated_constraints(&Paraboloid, &[3.0, 2.0]), vec!["sum_limit"]);
        assert!(violated_constraints(&Paraboloid, &[1.0, 1.0]).is_empty());
        assert!(violated_constraints(&Paraboloid, &[2.0, 2.0]).is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = CobylaSolver::default().minimize(&Paraboloid, &[1.0]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
