//! # Scissor Jack Mechanics
//!
//! Closed-form forces, stresses, buckling loads, weight and cost for a
//! scissor jack with four C-channel diagonals and one round crossbar.
//!
//! ## Assumptions
//!
//! - Maximum load occurs at the start (most acute) angle; the jack is not
//!   simulated across its lift range.
//! - Diagonals are pinned-pinned between their holes.
//! - The crossbar is exactly as long as needed at the start height.
//!
//! ## Units
//!
//! Inches, pounds, psi, degrees, dollars.

use std::f64::consts::PI;

use crate::errors::{CalcError, CalcResult};

/// End-condition factor for pinned-pinned Euler buckling
pub const END_CONDITION_FACTOR: f64 = 1.2;

// =============================================================================
// GEOMETRY AND FORCES
// =============================================================================

fn check_angle(angle_deg: f64) -> CalcResult<()> {
    if !angle_deg.is_finite() || angle_deg <= 0.0 || angle_deg >= 180.0 {
        return Err(CalcError::invalid_geometry(
            "start_angle",
            angle_deg,
            "Jack angle must lie strictly between 0° and 180°",
        ));
    }
    Ok(())
}

/// Compressive force carried by one diagonal.
///
/// # Formula
/// F_d = F / (2·sin θ)
///
/// # Example
/// ```rust
/// use jack_core::equations::jack::diagonal_force;
///
/// assert!((diagonal_force(3000.0, 30.0).unwrap() - 3000.0).abs() < 1e-9);
/// ```
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] unless `0° < θ < 180°`.
pub fn diagonal_force(force_lb: f64, start_angle_deg: f64) -> CalcResult<f64> {
    check_angle(start_angle_deg)?;
    Ok(force_lb / (2.0 * start_angle_deg.to_radians().sin()))
}

/// Tensile force carried by the crossbar.
///
/// # Formula
/// F_cb = F / tan θ
///
/// The cotangent is evaluated as `sin(90° − θ) / sin θ`, which gives exactly
/// zero at θ = 90°.
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] unless `0° < θ < 180°`.
pub fn crossbar_force(force_lb: f64, start_angle_deg: f64) -> CalcResult<f64> {
    check_angle(start_angle_deg)?;
    let cos = (90.0 - start_angle_deg).to_radians().sin();
    let sin = start_angle_deg.to_radians().sin();
    Ok(force_lb * cos / sin)
}

/// Angle between a diagonal and the base, in degrees.
///
/// # Formula
/// θ = asin(half_height / diagonal_length)
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] when `diagonal_length` is not
/// positive or `half_height` is outside `[0, diagonal_length]`.
pub fn start_angle(half_height_in: f64, diagonal_length_in: f64) -> CalcResult<f64> {
    if !diagonal_length_in.is_finite() || diagonal_length_in <= 0.0 {
        return Err(CalcError::invalid_geometry(
            "diagonal_length",
            diagonal_length_in,
            "Diagonal length must be positive",
        ));
    }
    if !half_height_in.is_finite() || half_height_in < 0.0 || half_height_in > diagonal_length_in {
        return Err(CalcError::invalid_geometry(
            "half_height",
            half_height_in,
            format!("Half height must lie within [0, {}]", diagonal_length_in),
        ));
    }
    Ok((half_height_in / diagonal_length_in).asin().to_degrees())
}

/// Crossbar length when the jack sits at its start height.
///
/// # Formula
/// l_cb = √(l_d² − (h_s/2)²)
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] when `diagonal_length` is not
/// positive, `start_height` is negative, or half the start height exceeds
/// the diagonal length.
pub fn crossbar_length(diagonal_length_in: f64, start_height_in: f64) -> CalcResult<f64> {
    if !diagonal_length_in.is_finite() || diagonal_length_in <= 0.0 {
        return Err(CalcError::invalid_geometry(
            "diagonal_length",
            diagonal_length_in,
            "Diagonal length must be positive",
        ));
    }
    let half_height = start_height_in / 2.0;
    if !half_height.is_finite() || half_height < 0.0 || half_height > diagonal_length_in {
        return Err(CalcError::invalid_geometry(
            "start_height",
            start_height_in,
            format!("Half of the start height must lie within [0, {}]", diagonal_length_in),
        ));
    }
    Ok((diagonal_length_in.powi(2) - half_height.powi(2)).sqrt())
}

/// Pinned length of a diagonal between its two holes: `l_d − 2·e`.
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] when the holes meet or overlap
/// (`l_d ≤ 2·e`).
pub fn effective_length(diagonal_length_in: f64, hole_offset_in: f64) -> CalcResult<f64> {
    let length = diagonal_length_in - 2.0 * hole_offset_in;
    if !length.is_finite() || length <= 0.0 {
        return Err(CalcError::invalid_geometry(
            "effective_length",
            length,
            "Diagonal must be longer than twice the hole offset",
        ));
    }
    Ok(length)
}

/// Angle of the diagonals at full extension, in degrees.
///
/// Uses half of `start_height + height_lifted` over the pinned length.
pub fn final_angle(
    start_height_in: f64,
    height_lifted_in: f64,
    diagonal_length_in: f64,
    hole_offset_in: f64,
) -> CalcResult<f64> {
    let length = effective_length(diagonal_length_in, hole_offset_in)?;
    start_angle((start_height_in + height_lifted_in) / 2.0, length)
}

// =============================================================================
// BUCKLING
// =============================================================================

/// Euler buckling load `C·π²·E·I / l²`.
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] for a non-positive length.
pub fn euler_buckling_load(end_factor: f64, e_psi: f64, moment_of_inertia_in4: f64, length_in: f64) -> CalcResult<f64> {
    if !length_in.is_finite() || length_in <= 0.0 {
        return Err(CalcError::invalid_geometry(
            "effective_length",
            length_in,
            "Buckling length must be positive",
        ));
    }
    Ok(end_factor * PI.powi(2) * e_psi * moment_of_inertia_in4 / length_in.powi(2))
}

/// Critical buckling load of one diagonal.
///
/// # Formula
/// P_cr = C·π²·E·I_min / l²
///
/// with `I_min = min(I_xx, I_yy)`, `l = l_d − 2·e` and `C = 1.2`.
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] when `l_d ≤ 2·e` or the section is
/// degenerate.
pub fn critical_buckling_load(
    e_psi: f64,
    diagonal_length_in: f64,
    h: f64,
    w: f64,
    t: f64,
    hole_offset_in: f64,
) -> CalcResult<f64> {
    let length = effective_length(diagonal_length_in, hole_offset_in)?;
    let min_i = super::section::channel_min_moment_of_inertia(h, w, t)?;
    euler_buckling_load(END_CONDITION_FACTOR, e_psi, min_i, length)
}

// =============================================================================
// STRESSES
// =============================================================================

/// Shear tearout stress at a pin hole: `√3·F / (4·e·t)`
#[inline]
pub fn tearout_stress(hole_offset_in: f64, thickness_in: f64, force_lb: f64) -> f64 {
    3.0_f64.sqrt() * force_lb / (4.0 * hole_offset_in * thickness_in)
}

/// Bearing stress between pin and hole wall: `|F| / (2·t·d_h)`
#[inline]
pub fn bearing_stress(hole_diameter_in: f64, thickness_in: f64, force_lb: f64) -> f64 {
    force_lb.abs() / (2.0 * thickness_in * hole_diameter_in)
}

/// Axial stress in the net section at a hole: `|F| / (2·t·(h − d_h))`.
///
/// # Errors
///
/// Returns [`CalcError::InvalidGeometry`] when the section is not taller than
/// the hole.
pub fn axial_stress(hole_diameter_in: f64, thickness_in: f64, section_height_in: f64, force_lb: f64) -> CalcResult<f64> {
    if section_height_in <= hole_diameter_in {
        return Err(CalcError::invalid_geometry(
            "cross_section_height",
            section_height_in,
            format!("Section height must exceed the hole diameter {}", hole_diameter_in),
        ));
    }
    Ok(force_lb.abs() / (2.0 * thickness_in * (section_height_in - hole_diameter_in)))
}

/// Tensile stress in the round crossbar: `F / (π·(d/2)²)`
#[inline]
pub fn crossbar_stress(force_lb: f64, crossbar_diameter_in: f64) -> f64 {
    force_lb / (PI * (crossbar_diameter_in / 2.0).powi(2))
}

/// Double-shear stress in a pin: `2F / (π·d²)`
#[inline]
pub fn pin_shear_stress(force_lb: f64, pin_diameter_in: f64) -> f64 {
    2.0 * force_lb / (PI * pin_diameter_in.powi(2))
}

/// Bearing stress of a pin on two plates of thickness `t_b`: `F / (2·d·t_b)`
#[inline]
pub fn pin_bearing_stress(force_lb: f64, pin_diameter_in: f64, plate_thickness_in: f64) -> f64 {
    force_lb / (2.0 * pin_diameter_in * plate_thickness_in)
}

// =============================================================================
// WEIGHT AND COST
// =============================================================================

/// Volume of one diagonal: extruded channel minus one hole bore
#[inline]
pub fn diagonal_volume(l_d: f64, h: f64, w: f64, t: f64, d_h: f64) -> f64 {
    l_d * super::section::channel_area(h, w, t) - PI * d_h.powi(2) * t
}

/// Volume of the crossbar
#[inline]
pub fn crossbar_volume(d_cb: f64, l_cb: f64) -> f64 {
    PI * (d_cb / 2.0).powi(2) * l_cb
}

/// Weight of the jack: four diagonals plus one crossbar (lbs).
///
/// # Formula
/// W = 4·V_d·ρ_d + V_cb·ρ_cb
#[allow(clippy::too_many_arguments)]
pub fn weight(
    l_d: f64,
    h: f64,
    w: f64,
    t: f64,
    d_h: f64,
    d_cb: f64,
    l_cb: f64,
    density_d: f64,
    density_cb: f64,
) -> f64 {
    4.0 * diagonal_volume(l_d, h, w, t, d_h) * density_d + crossbar_volume(d_cb, l_cb) * density_cb
}

/// Material cost of the jack ($).
///
/// # Formula
/// C = 4·V_d·ρ_d·c_d + V_cb·ρ_cb·c_cb
#[allow(clippy::too_many_arguments)]
pub fn cost(
    l_d: f64,
    h: f64,
    w: f64,
    t: f64,
    d_h: f64,
    d_cb: f64,
    l_cb: f64,
    density_d: f64,
    density_cb: f64,
    cost_d: f64,
    cost_cb: f64,
) -> f64 {
    4.0 * diagonal_volume(l_d, h, w, t, d_h) * density_d * cost_d
        + crossbar_volume(d_cb, l_cb) * density_cb * cost_cb
}
