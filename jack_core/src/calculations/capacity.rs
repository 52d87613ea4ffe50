//! # Failure Load Table
//!
//! Inverts the stress checks: for a given member geometry and the strength
//! governing each failure mode, compute the applied load predicted to cause
//! failure. This is the tabular companion to the safety-factor evaluation
//! and is useful for sanity-checking hand calculations and physical tests.
//!
//! | Location | Mode    | Failure load             |
//! |----------|---------|--------------------------|
//! | Diagonal | Tearout | τ·4·d_e·t                |
//! | Diagonal | Axial   | S·2·t·(h − d_h)          |
//! | Diagonal | Bearing | S·2·t·d_h                |
//! | Crossbar | Bearing | S·t_b·d_h                |
//! | Pin      | Shear   | τ·π·d_p²/2               |
//! | Pin      | Bearing | S·2·d_p·t_b              |

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Geometry and strengths for the failure load table.
///
/// ## JSON Example
///
/// ```json
/// {
///   "diagonal_edge_distance_in": 0.4,
///   "diagonal_thickness_in": 0.125,
///   "diagonal_hole_diameter_in": 0.25,
///   "diagonal_height_in": 1.25,
///   "crossbar_thickness_in": 0.06,
///   "crossbar_hole_diameter_in": 0.25,
///   "pin_diameter_in": 0.25,
///   "pin_plate_thickness_in": 0.06,
///   "strengths": { "diagonal_psi": 16000.0, "crossbar_psi": 32000.0, "pin_psi": 140000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityInput {
    /// Distance from hole center to the member end (in)
    pub diagonal_edge_distance_in: f64,
    /// Diagonal wall thickness (in)
    pub diagonal_thickness_in: f64,
    /// Diagonal hole diameter (in)
    pub diagonal_hole_diameter_in: f64,
    /// Diagonal channel height (in)
    pub diagonal_height_in: f64,
    /// Crossbar bracket thickness (in)
    pub crossbar_thickness_in: f64,
    /// Crossbar hole diameter (in)
    pub crossbar_hole_diameter_in: f64,
    /// Pin diameter (in)
    pub pin_diameter_in: f64,
    /// Thickness of the plates bearing on the pin (in)
    pub pin_plate_thickness_in: f64,
    /// Failure strengths per member
    pub strengths: FailureStrengths,
}

/// Failure strength used for each member (psi)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FailureStrengths {
    /// Diagonal members
    pub diagonal_psi: f64,
    /// Crossbar
    pub crossbar_psi: f64,
    /// Pins
    pub pin_psi: f64,
}

impl Default for CapacityInput {
    /// Small aluminum prototype jack
    fn default() -> Self {
        CapacityInput {
            diagonal_edge_distance_in: 0.4,
            diagonal_thickness_in: 0.125,
            diagonal_hole_diameter_in: 0.25,
            diagonal_height_in: 1.25,
            crossbar_thickness_in: 0.06,
            crossbar_hole_diameter_in: 0.25,
            pin_diameter_in: 0.25,
            pin_plate_thickness_in: 0.06,
            strengths: FailureStrengths {
                diagonal_psi: 16_000.0,
                crossbar_psi: 32_000.0,
                pin_psi: 140_000.0,
            },
        }
    }
}

impl CapacityInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let dimensions = [
            ("diagonal_edge_distance_in", self.diagonal_edge_distance_in),
            ("diagonal_thickness_in", self.diagonal_thickness_in),
            ("diagonal_hole_diameter_in", self.diagonal_hole_diameter_in),
            ("diagonal_height_in", self.diagonal_height_in),
            ("crossbar_thickness_in", self.crossbar_thickness_in),
            ("crossbar_hole_diameter_in", self.crossbar_hole_diameter_in),
            ("pin_diameter_in", self.pin_diameter_in),
            ("pin_plate_thickness_in", self.pin_plate_thickness_in),
            ("strengths.diagonal_psi", self.strengths.diagonal_psi),
            ("strengths.crossbar_psi", self.strengths.crossbar_psi),
            ("strengths.pin_psi", self.strengths.pin_psi),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        if self.diagonal_height_in <= self.diagonal_hole_diameter_in {
            return Err(CalcError::invalid_geometry(
                "diagonal_height_in",
                self.diagonal_height_in,
                "Channel height must exceed the hole diameter",
            ));
        }
        Ok(())
    }
}

/// Member where a failure occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureLocation {
    /// Diagonal member
    Diagonal,
    /// Crossbar
    Crossbar,
    /// Pin
    Pin,
}

impl std::fmt::Display for FailureLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureLocation::Diagonal => "Diagonal member",
            FailureLocation::Crossbar => "Cross bar",
            FailureLocation::Pin => "Pin",
        };
        write!(f, "{}", name)
    }
}

/// One row of the failure load table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRow {
    /// Member that fails
    pub location: FailureLocation,
    /// Failure mode (e.g., "Tearout")
    pub mode: String,
    /// Failure criterion used
    pub criterion: String,
    /// Stress equation, for the report
    pub equation: String,
    /// Strength used (psi)
    pub strength_psi: f64,
    /// Applied load predicted to cause failure (lbs)
    pub failure_load_lb: f64,
}

/// Results of the failure load calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// One row per failure mode
    pub rows: Vec<CapacityRow>,
}

impl CapacityResult {
    /// Row with the lowest failure load
    pub fn weakest(&self) -> Option<&CapacityRow> {
        self.rows
            .iter()
            .min_by(|a, b| a.failure_load_lb.total_cmp(&b.failure_load_lb))
    }
}

fn row(location: FailureLocation, mode: &str, equation: &str, strength_psi: f64, failure_load_lb: f64) -> CapacityRow {
    CapacityRow {
        location,
        mode: mode.to_string(),
        criterion: "Von Mises".to_string(),
        equation: equation.to_string(),
        strength_psi,
        failure_load_lb,
    }
}

/// Calculate the failure load for every mode.
///
/// # Returns
///
/// * `Ok(CapacityResult)` - One row per failure mode
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &CapacityInput) -> CalcResult<CapacityResult> {
    input.validate()?;

    let s = &input.strengths;
    let t = input.diagonal_thickness_in;
    let d_h = input.diagonal_hole_diameter_in;
    let d_p = input.pin_diameter_in;

    let rows = vec![
        row(
            FailureLocation::Diagonal,
            "Tearout",
            "τ = F_d/(4·d_e·t)",
            s.diagonal_psi,
            s.diagonal_psi * 4.0 * input.diagonal_edge_distance_in * t,
        ),
        row(
            FailureLocation::Diagonal,
            "Axial",
            "σ = F_d/(2·t·(h − d_h))",
            s.diagonal_psi,
            s.diagonal_psi * 2.0 * t * (input.diagonal_height_in - d_h),
        ),
        row(
            FailureLocation::Diagonal,
            "Bearing Stress",
            "σ = F_d/(2·t·d_h)",
            s.diagonal_psi,
            s.diagonal_psi * 2.0 * t * d_h,
        ),
        row(
            FailureLocation::Crossbar,
            "Bearing Stress",
            "σ = F_cb/(d_h·t_b)",
            s.crossbar_psi,
            s.crossbar_psi * input.crossbar_thickness_in * input.crossbar_hole_diameter_in,
        ),
        row(
            FailureLocation::Pin,
            "Shear",
            "τ = 2·F_d/(π·d_p²)",
            s.pin_psi,
            s.pin_psi * PI * d_p.powi(2) / 2.0,
        ),
        row(
            FailureLocation::Pin,
            "Bearing Stress",
            "σ = F_cb/(2·d_p·t_b)",
            s.pin_psi,
            s.pin_psi * 2.0 * d_p * input.pin_plate_thickness_in,
        ),
    ];

    Ok(CapacityResult { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::jack;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_failure_loads() {
        let result = calculate(&CapacityInput::default()).unwrap();
        let loads: Vec<f64> = result.rows.iter().map(|r| r.failure_load_lb).collect();
        assert_relative_eq!(loads[0], 3200.0, max_relative = 1e-12);
        assert_relative_eq!(loads[1], 4000.0, max_relative = 1e-12);
        assert_relative_eq!(loads[2], 1000.0, max_relative = 1e-12);
        assert_relative_eq!(loads[3], 480.0, max_relative = 1e-12);
        assert_relative_eq!(loads[4], 140_000.0 * PI * 0.0625 / 2.0, max_relative = 1e-12);
        assert_relative_eq!(loads[5], 4200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_failure_loads_invert_stress_equations() {
        let input = CapacityInput::default();
        let result = calculate(&input).unwrap();

        let bearing = &result.rows[2];
        let stress = jack::bearing_stress(input.diagonal_hole_diameter_in, input.diagonal_thickness_in, bearing.failure_load_lb);
        assert_relative_eq!(stress, bearing.strength_psi, max_relative = 1e-12);

        let axial = &result.rows[1];
        let stress = jack::axial_stress(
            input.diagonal_hole_diameter_in,
            input.diagonal_thickness_in,
            input.diagonal_height_in,
            axial.failure_load_lb,
        )
        .unwrap();
        assert_relative_eq!(stress, axial.strength_psi, max_relative = 1e-12);

        let shear = &result.rows[4];
        assert_relative_eq!(
            jack::pin_shear_stress(shear.failure_load_lb, input.pin_diameter_in),
            shear.strength_psi,
            max_relative = 1e-12
        );

        let pin_bearing = &result.rows[5];
        assert_relative_eq!(
            jack::pin_bearing_stress(pin_bearing.failure_load_lb, input.pin_diameter_in, input.pin_plate_thickness_in),
            pin_bearing.strength_psi,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_weakest_row() {
        let result = calculate(&CapacityInput::default()).unwrap();
        let weakest = result.weakest().unwrap();
        assert_eq!(weakest.location, FailureLocation::Crossbar);
    }

    #[test]
    fn test_invalid_input() {
        let mut input = CapacityInput::default();
        input.pin_diameter_in = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = CapacityInput::default();
        input.diagonal_height_in = 0.2;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_GEOMETRY");
    }
}
