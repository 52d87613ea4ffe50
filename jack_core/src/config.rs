//! # Jack Configuration
//!
//! All fixed parameters of a design problem: the applied load, lift
//! geometry, materials, minimum safety factors, modeling policies and solver
//! settings. A [`JackConfig`] is built once, validated, and then passed by
//! reference into every model and constraint evaluation; nothing in the
//! model reads process-wide state.
//!
//! ## Example
//!
//! ```rust
//! use jack_core::config::{JackConfig, SafetyTargets};
//! use jack_core::materials::JackMaterial;
//!
//! let mut config = JackConfig::default();
//! config.materials.diagonal = JackMaterial::Al3004H38;
//! config.targets = SafetyTargets::strict();
//! config.validate().unwrap();
//!
//! let json = serde_json::to_string_pretty(&config).unwrap();
//! assert!(json.contains("AL 3004 h38"));
//! ```

use serde::{Deserialize, Serialize};

use crate::design::DESIGN_DIMENSION;
use crate::equations::END_CONDITION_FACTOR;
use crate::errors::{CalcError, CalcResult};
use crate::materials::MemberMaterials;

/// Applied load and lift geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadCase {
    /// Load on the jack (lbs)
    pub force_lb: f64,
    /// Jack height in the lowered position (in)
    pub start_height_in: f64,
    /// Height gained from lowered to fully raised (in)
    pub height_lifted_in: f64,
    /// Pin hole diameter in the diagonals (in)
    pub hole_diameter_in: f64,
}

impl Default for LoadCase {
    fn default() -> Self {
        LoadCase {
            force_lb: 3000.0,
            start_height_in: 5.0,
            height_lifted_in: 6.0,
            hole_diameter_in: 0.5,
        }
    }
}

/// Minimum safety factor per failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyTargets {
    /// Diagonal buckling about the x-axis
    pub buckling_xx: f64,
    /// Diagonal buckling about the y-axis
    pub buckling_yy: f64,
    /// Crossbar tension
    pub tensile: f64,
    /// Pin hole tearout
    pub tearout: f64,
    /// Pin bearing on the diagonal
    pub bearing: f64,
    /// Net-section axial stress in the diagonal
    pub axial: f64,
}

impl SafetyTargets {
    /// Everyday targets: buckling 3, tensile 2, tearout 2.5, bearing 2, axial 2
    pub fn standard() -> Self {
        SafetyTargets {
            buckling_xx: 3.0,
            buckling_yy: 3.0,
            tensile: 2.0,
            tearout: 2.5,
            bearing: 2.0,
            axial: 2.0,
        }
    }

    /// Conservative targets: buckling 10, tensile 6, tearout 4, bearing 5, axial 4
    pub fn strict() -> Self {
        SafetyTargets {
            buckling_xx: 10.0,
            buckling_yy: 10.0,
            tensile: 6.0,
            tearout: 4.0,
            bearing: 5.0,
            axial: 4.0,
        }
    }

    fn as_named(&self) -> [(&'static str, f64); 6] {
        [
            ("targets.buckling_xx", self.buckling_xx),
            ("targets.buckling_yy", self.buckling_yy),
            ("targets.tensile", self.tensile),
            ("targets.tearout", self.tearout),
            ("targets.bearing", self.bearing),
            ("targets.axial", self.axial),
        ]
    }
}

impl Default for SafetyTargets {
    fn default() -> Self {
        SafetyTargets::standard()
    }
}

/// Which force is checked against the crossbar yield strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossbarForcePolicy {
    /// Horizontal crossbar tension `F / tan θ`
    CrossbarForce,
    /// Diagonal compression `F / (2·sin θ)`
    DiagonalForce,
}

impl Default for CrossbarForcePolicy {
    fn default() -> Self {
        CrossbarForcePolicy::CrossbarForce
    }
}

/// Settings handed to the constrained optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Starting point in design-vector order
    pub initial_guess: [f64; DESIGN_DIMENSION],
    /// Closed `(min, max)` interval per design variable
    pub bounds: [(f64, f64); DESIGN_DIMENSION],
    /// Objective evaluation budget
    pub max_evaluations: usize,
    /// Initial trust-region radius (in)
    pub initial_step: f64,
    /// Relative tolerance on the objective
    pub ftol_rel: f64,
    /// Relative tolerance on the design variables
    pub xtol_rel: f64,
    /// Largest constraint violation still reported as feasible
    pub feasibility_tolerance: f64,
}

impl SolverSettings {
    /// Default bounds and starting point for a given start height.
    ///
    /// The diagonal must at least reach half the start height.
    pub fn for_start_height(start_height_in: f64) -> Self {
        SolverSettings {
            initial_guess: [15.0, 2.0, 2.0, 0.25, 1.0, 2.0],
            bounds: [
                (start_height_in / 2.0, 20.0),
                (0.25, 5.0),
                (0.25, 5.0),
                (0.01, 1.0),
                (0.2, 2.0),
                (0.51, 1.0),
            ],
            max_evaluations: 2000,
            initial_step: 0.5,
            ftol_rel: 1.0e-10,
            xtol_rel: 1.0e-8,
            feasibility_tolerance: 1.0e-6,
        }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings::for_start_height(LoadCase::default().start_height_in)
    }
}

/// Complete, immutable description of one jack design problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JackConfig {
    /// Load and lift geometry
    pub load: LoadCase,
    /// Diagonal and crossbar materials
    pub materials: MemberMaterials,
    /// Minimum safety factors
    pub targets: SafetyTargets,
    /// Force used for the crossbar tensile check
    pub crossbar_force_policy: CrossbarForcePolicy,
    /// Euler end-condition factor C
    pub end_condition_factor: f64,
    /// Largest allowed diagonal angle at full extension (degrees)
    pub max_final_angle_deg: f64,
    /// Optimizer settings
    pub solver: SolverSettings,
}

impl JackConfig {
    /// Default configuration for a given load case
    pub fn for_load(load: LoadCase) -> Self {
        JackConfig {
            load,
            materials: MemberMaterials::default(),
            targets: SafetyTargets::standard(),
            crossbar_force_policy: CrossbarForcePolicy::default(),
            end_condition_factor: END_CONDITION_FACTOR,
            max_final_angle_deg: 80.0,
            solver: SolverSettings::for_start_height(load.start_height_in),
        }
    }

    /// Validate every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> CalcResult<()> {
        positive("load.force_lb", self.load.force_lb)?;
        positive("load.start_height_in", self.load.start_height_in)?;
        positive("load.hole_diameter_in", self.load.hole_diameter_in)?;
        if !self.load.height_lifted_in.is_finite() || self.load.height_lifted_in < 0.0 {
            return Err(CalcError::invalid_input(
                "load.height_lifted_in",
                self.load.height_lifted_in.to_string(),
                "Lift height cannot be negative",
            ));
        }
        positive("end_condition_factor", self.end_condition_factor)?;
        if !(self.max_final_angle_deg > 0.0 && self.max_final_angle_deg <= 90.0) {
            return Err(CalcError::invalid_input(
                "max_final_angle_deg",
                self.max_final_angle_deg.to_string(),
                "Angle cap must lie in (0°, 90°]",
            ));
        }
        for (field, value) in self.targets.as_named() {
            positive(field, value)?;
        }
        self.validate_solver()
    }

    fn validate_solver(&self) -> CalcResult<()> {
        let solver = &self.solver;
        for (index, (lower, upper)) in solver.bounds.iter().enumerate() {
            if !lower.is_finite() || !upper.is_finite() || lower > upper || *lower <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("solver.bounds[{}]", index),
                    format!("({}, {})", lower, upper),
                    "Bounds must be positive, finite and ordered",
                ));
            }
        }
        if solver.initial_guess.iter().any(|x| !x.is_finite()) {
            return Err(CalcError::invalid_input(
                "solver.initial_guess",
                format!("{:?}", solver.initial_guess),
                "Initial guess must be finite",
            ));
        }
        if solver.max_evaluations == 0 {
            return Err(CalcError::invalid_input(
                "solver.max_evaluations",
                "0",
                "At least one evaluation is required",
            ));
        }
        positive("solver.initial_step", solver.initial_step)?;
        if solver.feasibility_tolerance < 0.0 {
            return Err(CalcError::invalid_input(
                "solver.feasibility_tolerance",
                solver.feasibility_tolerance.to_string(),
                "Tolerance cannot be negative",
            ));
        }
        Ok(())
    }
}

impl Default for JackConfig {
    fn default() -> Self {
        JackConfig::for_load(LoadCase::default())
    }
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
    }
    Ok(())
}
