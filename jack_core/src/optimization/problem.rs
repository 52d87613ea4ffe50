//! Cost objective and inequality constraints of the jack design problem.
//!
//! Every function here takes the raw design vector `x` and recomputes the
//! start angle and member forces from it; nothing is cached between
//! evaluations. Constraints follow the `g(x) ≥ 0` convention.

use serde::{Deserialize, Serialize};

use crate::config::{CrossbarForcePolicy, JackConfig};
use crate::design::{DesignVector, DESIGN_DIMENSION};
use crate::equations::{self, jack, section};
use crate::errors::CalcResult;

use super::solver::NonlinearProgram;

/// Constraint value handed to the solver when the model is undefined at `x`
pub const INFEASIBLE_MARGIN: f64 = -1.0e6;

/// Objective value handed to the solver when the model is undefined at `x`
pub const INFEASIBLE_OBJECTIVE: f64 = 1.0e12;

/// Inequality constraints, in solver order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    /// x-axis buckling safety factor above target
    BucklingXx,
    /// y-axis buckling safety factor above target
    BucklingYy,
    /// Crossbar tensile safety factor above target
    Tensile,
    /// Tearout safety factor above target
    Tearout,
    /// Bearing safety factor above target
    Bearing,
    /// Axial safety factor above target
    Axial,
    /// Diagonal angle at full extension below the cap
    FinalAngle,
    /// Walls and crossbar fit inside the channel height
    WallClearanceHeight,
    /// Walls and crossbar fit inside the channel width
    WallClearanceWidth,
    /// Hole offset small against the diagonal length
    HoleOffsetRatio,
}

impl Constraint {
    /// All constraints in solver order
    pub const ALL: [Constraint; 10] = [
        Constraint::BucklingXx,
        Constraint::BucklingYy,
        Constraint::Tensile,
        Constraint::Tearout,
        Constraint::Bearing,
        Constraint::Axial,
        Constraint::FinalAngle,
        Constraint::WallClearanceHeight,
        Constraint::WallClearanceWidth,
        Constraint::HoleOffsetRatio,
    ];

    /// Short identifier used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::BucklingXx => "n_buckling_xx",
            Constraint::BucklingYy => "n_buckling_yy",
            Constraint::Tensile => "n_tensile",
            Constraint::Tearout => "n_tearout",
            Constraint::Bearing => "n_bearing",
            Constraint::Axial => "n_axial",
            Constraint::FinalAngle => "final_angle_margin",
            Constraint::WallClearanceHeight => "wall_clearance_h",
            Constraint::WallClearanceWidth => "wall_clearance_w",
            Constraint::HoleOffsetRatio => "hole_offset_ratio",
        }
    }

    /// Evaluate `g(x)`; the constraint is satisfied when the result is ≥ 0.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidGeometry`](crate::errors::CalcError) when
    /// the model is undefined at `x`.
    pub fn margin(&self, config: &JackConfig, x: &DesignVector) -> CalcResult<f64> {
        let targets = &config.targets;
        match self {
            Constraint::BucklingXx => {
                let (i_xx, _) = section::channel_moments_of_inertia(x.cross_section_height, x.cross_section_width, x.material_thickness)?;
                Ok(buckling_factor(config, x, i_xx)? - targets.buckling_xx)
            }
            Constraint::BucklingYy => {
                let (_, i_yy) = section::channel_moments_of_inertia(x.cross_section_height, x.cross_section_width, x.material_thickness)?;
                Ok(buckling_factor(config, x, i_yy)? - targets.buckling_yy)
            }
            Constraint::Tensile => {
                let (f_d, f_cb) = member_forces(config, x)?;
                let force = match config.crossbar_force_policy {
                    CrossbarForcePolicy::CrossbarForce => f_cb,
                    CrossbarForcePolicy::DiagonalForce => f_d,
                };
                let s_y = config.materials.crossbar.properties().fy_psi;
                Ok(s_y / jack::crossbar_stress(force, x.crossbar_diameter) - targets.tensile)
            }
            Constraint::Tearout => {
                let (f_d, _) = member_forces(config, x)?;
                let s_y = config.materials.diagonal.properties().fy_psi;
                Ok(s_y / jack::tearout_stress(x.hole_offset, x.material_thickness, f_d) - targets.tearout)
            }
            Constraint::Bearing => {
                let (f_d, _) = member_forces(config, x)?;
                let s_y = config.materials.diagonal.properties().fy_psi;
                let stress = jack::bearing_stress(config.load.hole_diameter_in, x.material_thickness, f_d);
                Ok(s_y / stress - targets.bearing)
            }
            Constraint::Axial => {
                let (f_d, _) = member_forces(config, x)?;
                let s_y = config.materials.diagonal.properties().fy_psi;
                let stress = jack::axial_stress(
                    config.load.hole_diameter_in,
                    x.material_thickness,
                    x.cross_section_height,
                    f_d,
                )?;
                Ok(s_y / stress - targets.axial)
            }
            Constraint::FinalAngle => {
                let angle = jack::final_angle(
                    config.load.start_height_in,
                    config.load.height_lifted_in,
                    x.length_diagonal,
                    x.hole_offset,
                )?;
                Ok(config.max_final_angle_deg - angle)
            }
            Constraint::WallClearanceHeight => Ok(x.height_clearance()),
            Constraint::WallClearanceWidth => Ok(x.width_clearance()),
            Constraint::HoleOffsetRatio => Ok(x.hole_offset_margin()),
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Diagonal and crossbar forces at the start angle of `x`
fn member_forces(config: &JackConfig, x: &DesignVector) -> CalcResult<(f64, f64)> {
    let angle = jack::start_angle(config.load.start_height_in / 2.0, x.length_diagonal)?;
    let f_d = jack::diagonal_force(config.load.force_lb, angle)?;
    let f_cb = jack::crossbar_force(config.load.force_lb, angle)?;
    Ok((f_d, f_cb))
}

/// Euler load on the pinned length over the diagonal force
fn buckling_factor(config: &JackConfig, x: &DesignVector, moment_of_inertia: f64) -> CalcResult<f64> {
    let (f_d, _) = member_forces(config, x)?;
    let length = jack::effective_length(x.length_diagonal, x.hole_offset)?;
    let e = config.materials.diagonal.properties().e_psi;
    let p_cr = jack::euler_buckling_load(config.end_condition_factor, e, moment_of_inertia, length)?;
    Ok(p_cr / f_d)
}

/// The jack cost-minimization problem for one configuration.
#[derive(Debug, Clone, Copy)]
pub struct DesignProblem<'a> {
    config: &'a JackConfig,
}

impl<'a> DesignProblem<'a> {
    /// Wrap a configuration
    pub fn new(config: &'a JackConfig) -> Self {
        DesignProblem { config }
    }

    /// Configuration of this problem
    pub fn config(&self) -> &JackConfig {
        self.config
    }

    /// Material cost of the jack at `x` ($).
    ///
    /// The crossbar length is derived from `x[0]` and the start height.
    pub fn objective(&self, x: &DesignVector) -> CalcResult<f64> {
        let load = &self.config.load;
        let diagonal = self.config.materials.diagonal.properties();
        let crossbar = self.config.materials.crossbar.properties();
        let l_cb = jack::crossbar_length(x.length_diagonal, load.start_height_in)?;
        Ok(equations::cost(
            x.length_diagonal,
            x.cross_section_height,
            x.cross_section_width,
            x.material_thickness,
            load.hole_diameter_in,
            x.crossbar_diameter,
            l_cb,
            diagonal.density_lb_in3,
            crossbar.density_lb_in3,
            diagonal.cost_per_lb,
            crossbar.cost_per_lb,
        ))
    }

    /// Every constraint margin at `x`, in solver order
    pub fn margins(&self, x: &DesignVector) -> Vec<ConstraintMargin> {
        Constraint::ALL
            .iter()
            .map(|constraint| ConstraintMargin {
                constraint: *constraint,
                margin: constraint.margin(self.config, x).ok(),
            })
            .collect()
    }
}

/// Value of one constraint at a design point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintMargin {
    /// Which constraint
    pub constraint: Constraint,
    /// `g(x)`, `None` when undefined at the point
    pub margin: Option<f64>,
}

impl ConstraintMargin {
    /// Check whether the constraint holds within `tolerance`
    pub fn is_satisfied(&self, tolerance: f64) -> bool {
        self.margin.map_or(false, |m| m >= -tolerance)
    }
}

impl NonlinearProgram for DesignProblem<'_> {
    fn dimension(&self) -> usize {
        DESIGN_DIMENSION
    }

    fn objective(&self, x: &[f64]) -> f64 {
        let value = DesignVector::from_slice(x).and_then(|design| DesignProblem::objective(self, &design));
        match value {
            Ok(cost) if cost.is_finite() => cost,
            Ok(cost) => {
                log::trace!("objective not finite at {:?}: {}", x, cost);
                INFEASIBLE_OBJECTIVE
            }
            Err(e) => {
                log::trace!("objective undefined at {:?}: {}", x, e);
                INFEASIBLE_OBJECTIVE
            }
        }
    }

    fn constraint_count(&self) -> usize {
        Constraint::ALL.len()
    }

    fn constraint_name(&self, index: usize) -> &'static str {
        Constraint::ALL[index].name()
    }

    fn constraint(&self, index: usize, x: &[f64]) -> f64 {
        let constraint = Constraint::ALL[index];
        let value = DesignVector::from_slice(x).and_then(|design| constraint.margin(self.config, &design));
        match value {
            Ok(margin) if margin.is_finite() => margin,
            // Zero crossbar stress at a vertical diagonal
            Ok(margin) if margin == f64::INFINITY => f64::MAX,
            Ok(margin) => {
                log::trace!("{} not finite at {:?}: {}", constraint, x, margin);
                INFEASIBLE_MARGIN
            }
            Err(e) => {
                log::trace!("{} undefined at {:?}: {}", constraint, x, e);
                INFEASIBLE_MARGIN
            }
        }
    }

    fn bounds(&self) -> Vec<(f64, f64)> {
        self.config.solver.bounds.to_vec()
    }

    fn initial_guess(&self) -> Vec<f64> {
        self.config.solver.initial_guess.to_vec()
    }
}
