//! # Design Vector
//!
//! The six geometric design variables of the jack, all in inches. The
//! optimizer works on plain `[f64; 6]` slices in the order below;
//! [`DesignVector`] gives each slot a name.
//!
//! | Index | Field                  |
//! |-------|------------------------|
//! | 0     | `length_diagonal`      |
//! | 1     | `cross_section_height` |
//! | 2     | `cross_section_width`  |
//! | 3     | `material_thickness`   |
//! | 4     | `crossbar_diameter`    |
//! | 5     | `hole_offset`          |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Number of design variables
pub const DESIGN_DIMENSION: usize = 6;

/// Names of the design variables in vector order
pub const DESIGN_VARIABLE_NAMES: [&str; DESIGN_DIMENSION] = [
    "length_diagonal",
    "cross_section_height",
    "cross_section_width",
    "material_thickness",
    "crossbar_diameter",
    "hole_offset",
];

/// Jack geometry under design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_diagonal": 15.0,
///   "cross_section_height": 2.0,
///   "cross_section_width": 2.0,
///   "material_thickness": 0.25,
///   "crossbar_diameter": 1.0,
///   "hole_offset": 0.75
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignVector {
    /// Diagonal member length (in)
    pub length_diagonal: f64,
    /// Channel height (in)
    pub cross_section_height: f64,
    /// Channel width (in)
    pub cross_section_width: f64,
    /// Wall thickness of the channel (in)
    pub material_thickness: f64,
    /// Crossbar diameter (in)
    pub crossbar_diameter: f64,
    /// Distance from the end of a diagonal to its pin hole (in)
    pub hole_offset: f64,
}

impl DesignVector {
    /// Build from an array in optimizer order
    pub fn from_array(x: [f64; DESIGN_DIMENSION]) -> Self {
        DesignVector {
            length_diagonal: x[0],
            cross_section_height: x[1],
            cross_section_width: x[2],
            material_thickness: x[3],
            crossbar_diameter: x[4],
            hole_offset: x[5],
        }
    }

    /// Build from a slice in optimizer order.
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::InvalidInput`] when the slice does not hold
    /// exactly six values.
    pub fn from_slice(x: &[f64]) -> CalcResult<Self> {
        let array: [f64; DESIGN_DIMENSION] = x.try_into().map_err(|_| {
            CalcError::invalid_input(
                "design_vector",
                format!("{:?}", x),
                format!("Expected {} values", DESIGN_DIMENSION),
            )
        })?;
        Ok(DesignVector::from_array(array))
    }

    /// Values in optimizer order
    pub fn to_array(&self) -> [f64; DESIGN_DIMENSION] {
        [
            self.length_diagonal,
            self.cross_section_height,
            self.cross_section_width,
            self.material_thickness,
            self.crossbar_diameter,
            self.hole_offset,
        ]
    }

    /// Check that every variable is finite and strictly positive.
    ///
    /// Geometric feasibility (wall clearance, hole spacing) is a constraint
    /// of the optimization, not a validity condition: infeasible designs can
    /// still be evaluated.
    pub fn validate(&self) -> CalcResult<()> {
        for (name, value) in DESIGN_VARIABLE_NAMES.iter().zip(self.to_array()) {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_geometry(*name, value, "Design variables must be positive"));
            }
        }
        Ok(())
    }

    /// Channel depth left over after both walls and the crossbar, along the height
    pub fn height_clearance(&self) -> f64 {
        self.cross_section_height - 2.0 * self.material_thickness - self.crossbar_diameter
    }

    /// Channel depth left over after both walls and the crossbar, along the width
    pub fn width_clearance(&self) -> f64 {
        self.cross_section_width - 2.0 * self.material_thickness - self.crossbar_diameter
    }

    /// `l_d − 10·e`; positive when the hole offset is small against the diagonal
    pub fn hole_offset_margin(&self) -> f64 {
        self.length_diagonal - 10.0 * self.hole_offset
    }
}

impl From<[f64; DESIGN_DIMENSION]> for DesignVector {
    fn from(x: [f64; DESIGN_DIMENSION]) -> Self {
        DesignVector::from_array(x)
    }
}
