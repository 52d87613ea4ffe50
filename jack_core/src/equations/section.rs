//! # Cross-Section Property Formulas
//!
//! Geometric properties of the C-channel ("U" shape) used for the diagonal
//! members. The channel is decomposed into three rectangles: two flanges of
//! height `h` and thickness `t`, and a web of length `w - 2t` and thickness `t`.
//!
//! ```text
//!     ┌─┐       ┌─┐   ▲
//!     │ │       │ │   │
//!     │ │       │ │   h
//!     │ └───────┘ │   │
//!     └───────────┘   ▼
//!     ◄─────w─────►
//! ```
//!
//! ## Notation
//!
//! - `h` = Channel height (flange length)
//! - `w` = Channel width (outside to outside)
//! - `t` = Wall thickness
//! - `x̄, ȳ` = Centroid, x measured from the left, y from the bottom
//! - `I_xx, I_yy` = Second moments of area about the centroidal axes
//!
//! All property functions are recomputed on demand from `(h, w, t)`.

use crate::errors::{CalcError, CalcResult};

/// Denominators smaller than this are treated as zero
const AREA_EPSILON: f64 = 1.0e-12;

/// Reject non-positive or non-finite channel dimensions
fn check_dimensions(h: f64, w: f64, t: f64) -> CalcResult<()> {
    for (name, value) in [("cross_section_height", h), ("cross_section_width", w), ("material_thickness", t)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::invalid_geometry(name, value, "Channel dimensions must be positive"));
        }
    }
    Ok(())
}

/// Calculate the net cross-sectional area of the channel
///
/// # Formula
/// A = h·w − (w − 2t)·(h − t)
///
/// # Example
/// ```rust
/// use jack_core::equations::section::channel_area;
///
/// // 2" x 2" channel, 1/4" wall: A = 4 - 1.5 * 1.75
/// assert!((channel_area(2.0, 2.0, 0.25) - 1.375).abs() < 1e-12);
/// ```
#[inline]
pub fn channel_area(h: f64, w: f64, t: f64) -> f64 {
    h * w - (w - 2.0 * t) * (h - t)
}

/// Calculate the centroid of the channel in the "U" orientation.
///
/// # Formula
/// x̄ = h/2
///
/// ȳ = (t·w − 2t² + 2h²) / (4h + 2w − 4t)
///
/// which is the area-weighted first moment of the two flanges and the web
/// divided by the total area.
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] when a dimension is not positive
/// or the area denominator vanishes.
pub fn channel_centroid(h: f64, w: f64, t: f64) -> CalcResult<(f64, f64)> {
    check_dimensions(h, w, t)?;

    let denominator = 4.0 * h + 2.0 * w - 4.0 * t;
    if denominator.abs() < AREA_EPSILON {
        return Err(CalcError::invalid_geometry(
            "centroid_denominator",
            denominator,
            "Channel has no net area",
        ));
    }

    let x_bar = h / 2.0;
    let y_bar = (t * w - 2.0 * t.powi(2) + 2.0 * h.powi(2)) / denominator;
    Ok((x_bar, y_bar))
}

/// Calculate the second moments of area `(I_xx, I_yy)` of the channel.
///
/// # Formula
/// I_xx = 2t·ȳ³/3 + 2t·(h − ȳ)³/3 + ȳ³·(w − 2t)/3 + (w − 2t)·(t − ȳ)³/3
///
/// I_yy = h·w³/12 − 2h·(w/2 − t)³/3 + 2t·(w/2 − t)³/3
///
/// `I_xx` sums the three rectangles about the centroidal x-axis through ȳ.
/// `I_yy` is taken about the vertical symmetry axis and needs no centroid.
///
/// # Example
/// ```rust
/// use jack_core::equations::section::channel_moments_of_inertia;
///
/// let (i_xx, i_yy) = channel_moments_of_inertia(2.0, 2.0, 0.25).unwrap();
/// assert!(i_xx > 0.0 && i_yy > 0.0);
/// ```
///
/// # Errors
///
/// Propagates the centroid errors of [`channel_centroid`].
pub fn channel_moments_of_inertia(h: f64, w: f64, t: f64) -> CalcResult<(f64, f64)> {
    let (_, y_bar) = channel_centroid(h, w, t)?;
    let web = w - 2.0 * t;

    let i_xx = 2.0 * t * y_bar.powi(3) / 3.0
        + 2.0 * t * (h - y_bar).powi(3) / 3.0
        + y_bar.powi(3) * web / 3.0
        + web * (t - y_bar).powi(3) / 3.0;

    let half_gap = w / 2.0 - t;
    let i_yy = h * w.powi(3) / 12.0 - 2.0 * h * half_gap.powi(3) / 3.0
        + 2.0 * t * half_gap.powi(3) / 3.0;

    Ok((i_xx, i_yy))
}

/// Smaller of the two second moments of area (governs buckling)
pub fn channel_min_moment_of_inertia(h: f64, w: f64, t: f64) -> CalcResult<f64> {
    let (i_xx, i_yy) = channel_moments_of_inertia(h, w, t)?;
    Ok(i_xx.min(i_yy))
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_channel_area_matches_rectangle_sum() {
        let (h, w, t) = (2.0, 3.0, 0.125);
        let flanges = 2.0 * h * t;
        let web = (w - 2.0 * t) * t;
        assert_relative_eq!(channel_area(h, w, t), flanges + web, max_relative = 1e-12);
    }

    #[test]
    fn test_centroid_reference_section() {
        let (x_bar, y_bar) = channel_centroid(2.0, 2.0, 0.25).unwrap();
        assert_eq!(x_bar, 1.0);
        assert_relative_eq!(y_bar, 8.375 / 11.0, max_relative = 1e-12);
    }

    #[test]
    fn test_centroid_x_is_half_height() {
        for &(h, w, t) in &[(0.5, 0.75, 0.05), (2.0, 2.0, 0.25), (4.5, 1.25, 0.3), (5.0, 5.0, 1.0)] {
            let (x_bar, _) = channel_centroid(h, w, t).unwrap();
            assert_eq!(x_bar, h / 2.0);
        }
    }

    #[test]
    fn test_moments_reference_section() {
        let (i_xx, i_yy) = channel_moments_of_inertia(2.0, 2.0, 0.25).unwrap();
        assert_relative_eq!(i_xx, 0.5440932765151516, max_relative = 1e-12);
        assert_relative_eq!(i_yy, 0.8411458333333333, max_relative = 1e-12);
    }

    #[test]
    fn test_moments_positive_for_valid_sections() {
        let heights: [f64; 4] = [0.25, 0.8, 2.0, 5.0];
        let widths: [f64; 4] = [0.25, 1.1, 3.0, 5.0];
        for &h in &heights {
            for &w in &widths {
                for fraction in [0.05, 0.2, 0.45] {
                    let t = fraction * h.min(w);
                    let (i_xx, i_yy) = channel_moments_of_inertia(h, w, t).unwrap();
                    assert!(i_xx > 0.0, "I_xx = {} for h={}, w={}, t={}", i_xx, h, w, t);
                    assert!(i_yy > 0.0, "I_yy = {} for h={}, w={}, t={}", i_yy, h, w, t);
                }
            }
        }
    }

    #[test]
    fn test_min_moment_of_inertia() {
        let min_i = channel_min_moment_of_inertia(2.0, 2.0, 0.25).unwrap();
        assert_relative_eq!(min_i, 0.5440932765151516, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_denominator_is_invalid_geometry() {
        // 4h + 2w - 4t = 0 with h = 0.25, w = 0.25, t = 0.375
        let err = channel_centroid(0.25, 0.25, 0.375).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_non_positive_dimension_rejected() {
        assert!(channel_centroid(2.0, 0.0, 0.25).is_err());
        assert!(channel_moments_of_inertia(-1.0, 2.0, 0.25).is_err());
        assert!(channel_moments_of_inertia(2.0, 2.0, f64::NAN).is_err());
    }
}
