//! # Jack Safety Factors
//!
//! Evaluates one fully specified jack design: member forces at the start
//! angle, the five failure-mode safety factors, and the weight and material
//! cost. This is the single entry point the optimizer's constraints use.
//!
//! ## Assumptions
//!
//! - Load is applied at the start (lowest) height, where the diagonal angle
//!   is most acute and member forces peak
//! - Diagonal buckling uses the pinned length between holes
//! - Bearing, tearout and axial checks use the diagonal material; the
//!   tensile check uses the crossbar material
//!
//! ## Example
//!
//! ```rust
//! use jack_core::calculations::safety::safety_factors;
//! use jack_core::config::JackConfig;
//! use jack_core::design::DesignVector;
//!
//! let design = DesignVector::from_array([15.0, 2.0, 2.0, 0.25, 1.0, 0.75]);
//! let result = safety_factors(&design, &JackConfig::default()).unwrap();
//! println!("n_buckling = {:.2}, cost = ${:.2}", result.n_buckling, result.cost_usd);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{CrossbarForcePolicy, JackConfig, SafetyTargets};
use crate::design::DesignVector;
use crate::equations::{self, jack, section};
use crate::errors::CalcResult;

/// Failure modes checked for every design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    /// Euler buckling of a diagonal about its x-axis
    BucklingXx,
    /// Euler buckling of a diagonal about its y-axis
    BucklingYy,
    /// Yielding of the crossbar in tension
    Tensile,
    /// Shear tearout of a pin hole
    Tearout,
    /// Pin bearing on the hole wall
    Bearing,
    /// Net-section yielding of a diagonal at its hole
    Axial,
}

impl FailureMode {
    /// All failure modes in report order
    pub const ALL: [FailureMode; 6] = [
        FailureMode::BucklingXx,
        FailureMode::BucklingYy,
        FailureMode::Tensile,
        FailureMode::Tearout,
        FailureMode::Bearing,
        FailureMode::Axial,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FailureMode::BucklingXx => "Diagonal Buckling (x-x)",
            FailureMode::BucklingYy => "Diagonal Buckling (y-y)",
            FailureMode::Tensile => "Crossbar Tensile",
            FailureMode::Tearout => "Tearout",
            FailureMode::Bearing => "Bearing Stress",
            FailureMode::Axial => "Axial Stress",
        }
    }

    /// Minimum safety factor required for this mode
    pub fn target(&self, targets: &SafetyTargets) -> f64 {
        match self {
            FailureMode::BucklingXx => targets.buckling_xx,
            FailureMode::BucklingYy => targets.buckling_yy,
            FailureMode::Tensile => targets.tensile,
            FailureMode::Tearout => targets.tearout,
            FailureMode::Bearing => targets.bearing,
            FailureMode::Axial => targets.axial,
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Results of a safety evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "start_angle_deg": 9.59,
///   "diagonal_force_lb": 9000.0,
///   "crossbar_force_lb": 17748.24,
///   "n_buckling": 108.43,
///   "n_tensile": 3.32,
///   "n_tearout": 3.61,
///   "n_bearing": 2.08,
///   "n_axial": 6.25,
///   "weight_lb": 26.47,
///   "cost_usd": 58.75
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyResult {
    /// Diagonal angle at the start height (degrees)
    pub start_angle_deg: f64,
    /// Diagonal angle at full extension (degrees), `None` when the diagonals
    /// cannot reach the raised height
    pub final_angle_deg: Option<f64>,
    /// Compression in one diagonal (lbs)
    pub diagonal_force_lb: f64,
    /// Tension in the crossbar (lbs)
    pub crossbar_force_lb: f64,
    /// Crossbar length (in)
    pub crossbar_length_in: f64,
    /// Euler load about the x-axis (lbs)
    pub critical_load_xx_lb: f64,
    /// Euler load about the y-axis (lbs)
    pub critical_load_yy_lb: f64,
    /// Buckling safety factor on the weaker axis
    pub n_buckling: f64,
    /// Buckling safety factor about the x-axis
    pub n_buckling_xx: f64,
    /// Buckling safety factor about the y-axis
    pub n_buckling_yy: f64,
    /// Crossbar tensile safety factor
    pub n_tensile: f64,
    /// Tearout safety factor
    pub n_tearout: f64,
    /// Bearing safety factor
    pub n_bearing: f64,
    /// Axial safety factor
    pub n_axial: f64,
    /// Total weight (lbs)
    pub weight_lb: f64,
    /// Material cost ($)
    pub cost_usd: f64,
}

impl SafetyResult {
    /// Safety factor achieved in a failure mode
    pub fn factor(&self, mode: FailureMode) -> f64 {
        match mode {
            FailureMode::BucklingXx => self.n_buckling_xx,
            FailureMode::BucklingYy => self.n_buckling_yy,
            FailureMode::Tensile => self.n_tensile,
            FailureMode::Tearout => self.n_tearout,
            FailureMode::Bearing => self.n_bearing,
            FailureMode::Axial => self.n_axial,
        }
    }

    /// Check whether every safety factor meets its target
    pub fn passes(&self, targets: &SafetyTargets) -> bool {
        FailureMode::ALL
            .iter()
            .all(|mode| self.factor(*mode) >= mode.target(targets))
    }

    /// Failure mode with the smallest achieved-to-required ratio
    pub fn governing_mode(&self, targets: &SafetyTargets) -> FailureMode {
        let ratio = |mode: &FailureMode| self.factor(*mode) / mode.target(targets);
        FailureMode::ALL
            .into_iter()
            .min_by(|a, b| ratio(a).total_cmp(&ratio(b)))
            .unwrap_or(FailureMode::BucklingXx)
    }
}

/// Evaluate the safety factors, weight and cost of one design.
///
/// Every quantity is recomputed from `design` and `config`; repeated calls
/// with identical inputs return identical results.
///
/// # Arguments
///
/// * `design` - Jack geometry
/// * `config` - Load case, materials and modeling policies
///
/// # Returns
///
/// * `Ok(SafetyResult)` - Forces, safety factors, weight and cost
/// * `Err(CalcError::InvalidGeometry)` - A formula is undefined for `design`
pub fn safety_factors(design: &DesignVector, config: &JackConfig) -> CalcResult<SafetyResult> {
    design.validate()?;

    let load = &config.load;
    let diagonal = config.materials.diagonal.properties();
    let crossbar = config.materials.crossbar.properties();

    let l_d = design.length_diagonal;
    let h = design.cross_section_height;
    let w = design.cross_section_width;
    let t = design.material_thickness;

    // Forces at the start angle
    let start_angle_deg = jack::start_angle(load.start_height_in / 2.0, l_d)?;
    let diagonal_force_lb = jack::diagonal_force(load.force_lb, start_angle_deg)?;
    let crossbar_force_lb = jack::crossbar_force(load.force_lb, start_angle_deg)?;
    let crossbar_length_in = jack::crossbar_length(l_d, load.start_height_in)?;

    // Buckling per axis
    let length = jack::effective_length(l_d, design.hole_offset)?;
    let (i_xx, i_yy) = section::channel_moments_of_inertia(h, w, t)?;
    let critical_load_xx_lb = jack::euler_buckling_load(config.end_condition_factor, diagonal.e_psi, i_xx, length)?;
    let critical_load_yy_lb = jack::euler_buckling_load(config.end_condition_factor, diagonal.e_psi, i_yy, length)?;
    let n_buckling_xx = critical_load_xx_lb / diagonal_force_lb;
    let n_buckling_yy = critical_load_yy_lb / diagonal_force_lb;

    let tensile_force = match config.crossbar_force_policy {
        CrossbarForcePolicy::CrossbarForce => crossbar_force_lb,
        CrossbarForcePolicy::DiagonalForce => diagonal_force_lb,
    };
    let n_tensile = crossbar.fy_psi / jack::crossbar_stress(tensile_force, design.crossbar_diameter);
    let n_tearout = diagonal.fy_psi / jack::tearout_stress(design.hole_offset, t, diagonal_force_lb);
    let n_bearing = diagonal.fy_psi / jack::bearing_stress(load.hole_diameter_in, t, diagonal_force_lb);
    let n_axial = diagonal.fy_psi / jack::axial_stress(load.hole_diameter_in, t, h, diagonal_force_lb)?;

    let final_angle_deg = jack::final_angle(
        load.start_height_in,
        load.height_lifted_in,
        l_d,
        design.hole_offset,
    )
    .ok();

    let weight_lb = equations::weight(
        l_d,
        h,
        w,
        t,
        load.hole_diameter_in,
        design.crossbar_diameter,
        crossbar_length_in,
        diagonal.density_lb_in3,
        crossbar.density_lb_in3,
    );
    let cost_usd = equations::cost(
        l_d,
        h,
        w,
        t,
        load.hole_diameter_in,
        design.crossbar_diameter,
        crossbar_length_in,
        diagonal.density_lb_in3,
        crossbar.density_lb_in3,
        diagonal.cost_per_lb,
        crossbar.cost_per_lb,
    );

    Ok(SafetyResult {
        start_angle_deg,
        final_angle_deg,
        diagonal_force_lb,
        crossbar_force_lb,
        crossbar_length_in,
        critical_load_xx_lb,
        critical_load_yy_lb,
        n_buckling: n_buckling_xx.min(n_buckling_yy),
        n_buckling_xx,
        n_buckling_yy,
        n_tensile,
        n_tearout,
        n_bearing,
        n_axial,
        weight_lb,
        cost_usd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{JackMaterial, MemberMaterials};
    use approx::assert_relative_eq;

    fn reference_design() -> DesignVector {
        DesignVector::from_array([15.0, 2.0, 2.0, 0.25, 1.0, 2.0])
    }

    #[test]
    fn test_reference_forces() {
        let result = safety_factors(&reference_design(), &JackConfig::default()).unwrap();
        // sin θ = 2.5 / 15, so F_d = 3000 / (2 · 2.5/15) = 9000
        assert_relative_eq!(result.diagonal_force_lb, 9000.0, max_relative = 1e-12);
        assert_relative_eq!(result.crossbar_force_lb, 17748.23934929885, max_relative = 1e-9);
        assert_relative_eq!(result.crossbar_length_in, 14.79019945774904, max_relative = 1e-12);
    }

    #[test]
    fn test_reference_buckling() {
        let result = safety_factors(&reference_design(), &JackConfig::default()).unwrap();
        assert_relative_eq!(result.critical_load_xx_lb, 1469867.0771238257, max_relative = 1e-9);
        assert_eq!(result.n_buckling, result.n_buckling_xx.min(result.n_buckling_yy));
        assert!(result.n_buckling_yy > result.n_buckling_xx);
    }

    #[test]
    fn test_reference_weight_and_cost() {
        let result = safety_factors(&reference_design(), &JackConfig::default()).unwrap();
        assert_relative_eq!(result.weight_lb, 26.465330260549937, max_relative = 1e-9);
        assert_relative_eq!(result.cost_usd, 58.753033178420864, max_relative = 1e-9);
    }

    #[test]
    fn test_mid_offset_factors() {
        // Hole offset 0.75 leaves a pinned length of 13.5
        let design = DesignVector::from_array([15.0, 2.0, 2.0, 0.25, 1.0, 0.75]);
        let result = safety_factors(&design, &JackConfig::default()).unwrap();
        assert_relative_eq!(result.n_buckling, 108.43098084559237, max_relative = 1e-6);
        assert_relative_eq!(result.n_tensile, 3.3189129972565805, max_relative = 1e-6);
        assert_relative_eq!(result.cost_usd, 58.753033178420864, max_relative = 1e-9);
    }

    #[test]
    fn test_stress_factors_use_diagonal_material() {
        let result = safety_factors(&reference_design(), &JackConfig::default()).unwrap();
        let s_y = 75_000.0;
        assert_relative_eq!(result.n_bearing, s_y / (9000.0 / (2.0 * 0.25 * 0.5)), max_relative = 1e-12);
        assert_relative_eq!(result.n_axial, s_y / (9000.0 / (2.0 * 0.25 * 1.5)), max_relative = 1e-12);
    }

    #[test]
    fn test_re_evaluation_is_bit_identical() {
        let config = JackConfig::default();
        let first = safety_factors(&reference_design(), &config).unwrap();
        let second = safety_factors(&reference_design(), &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.cost_usd.to_bits(), second.cost_usd.to_bits());
    }

    #[test]
    fn test_thicker_walls_are_safer_and_heavier() {
        let config = JackConfig::default();
        let thin = safety_factors(&reference_design(), &config).unwrap();
        let mut thicker = reference_design();
        thicker.material_thickness = 0.3;
        let thick = safety_factors(&thicker, &config).unwrap();

        assert!(thick.n_tearout > thin.n_tearout);
        assert!(thick.n_bearing > thin.n_bearing);
        assert!(thick.n_axial > thin.n_axial);
        assert!(thick.weight_lb > thin.weight_lb);
        assert!(thick.cost_usd > thin.cost_usd);
    }

    #[test]
    fn test_crossbar_policy() {
        let mut config = JackConfig::default();
        let by_crossbar = safety_factors(&reference_design(), &config).unwrap();
        config.crossbar_force_policy = CrossbarForcePolicy::DiagonalForce;
        let by_diagonal = safety_factors(&reference_design(), &config).unwrap();
        // F_cb = 17748 lbs > F_d = 9000 lbs at this angle
        assert!(by_diagonal.n_tensile > by_crossbar.n_tensile);
    }

    #[test]
    fn test_aluminum_diagonals_cheaper_than_steel() {
        let steel = safety_factors(&reference_design(), &JackConfig::default()).unwrap();
        let mut config = JackConfig::default();
        config.materials = MemberMaterials::with_diagonal(JackMaterial::Al3004H38);
        let aluminum = safety_factors(&reference_design(), &config).unwrap();
        assert!(aluminum.weight_lb < steel.weight_lb);
        assert!(aluminum.n_bearing < steel.n_bearing);
    }

    #[test]
    fn test_final_angle_missing_when_unreachable() {
        // Raised half height (5 + 6) / 2 = 5.5 exceeds the pinned length 3 - 2 · 0.51
        let design = DesignVector::from_array([3.0, 2.0, 2.0, 0.25, 1.0, 0.51]);
        let result = safety_factors(&design, &JackConfig::default()).unwrap();
        assert!(result.final_angle_deg.is_none());
    }

    #[test]
    fn test_overlapping_holes_rejected() {
        let design = DesignVector::from_array([15.0, 2.0, 2.0, 0.25, 1.0, 7.5]);
        let err = safety_factors(&design, &JackConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_short_section_rejected() {
        let mut design = reference_design();
        design.cross_section_height = 0.4;
        assert!(safety_factors(&design, &JackConfig::default()).is_err());
    }

    #[test]
    fn test_governing_mode_and_passes() {
        let config = JackConfig::default();
        let result = safety_factors(&reference_design(), &config).unwrap();
        let governing = result.governing_mode(&config.targets);
        let ratio = result.factor(governing) / governing.target(&config.targets);
        for mode in FailureMode::ALL {
            assert!(result.factor(mode) / mode.target(&config.targets) >= ratio);
        }
        assert_eq!(result.passes(&config.targets), ratio >= 1.0);
    }

    #[test]
    fn test_serialization() {
        let result = safety_factors(&reference_design(), &JackConfig::default()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        let roundtrip: SafetyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.n_tearout, result.n_tearout);
    }
}
