//! # Structural Mechanics Equations
//!
//! Every closed-form formula used by the jack model lives here, so the
//! calculations and the optimizer share a single implementation.
//!
//! ## Modules
//!
//! - [`section`] - C-channel properties (A, centroid, I)
//! - [`jack`] - Forces, angles, stresses, buckling, weight and cost
//!
//! ## Sign Conventions
//!
//! - **Diagonal force**: Positive in compression
//! - **Crossbar force**: Positive in tension
//! - **Angles**: Degrees, measured from the base to the diagonal
//!
//! ## References
//!
//! - Shigley's Mechanical Engineering Design, Chapter 4 (Euler columns)
//! - Roark's Formulas for Stress and Strain, 8th Edition, Appendix A

pub mod jack;
pub mod section;

pub use jack::{
    axial_stress,
    bearing_stress,
    cost,
    critical_buckling_load,
    crossbar_force,
    crossbar_length,
    crossbar_stress,
    diagonal_force,
    effective_length,
    euler_buckling_load,
    final_angle,
    pin_bearing_stress,
    pin_shear_stress,
    start_angle,
    tearout_stress,
    weight,
    END_CONDITION_FACTOR,
};
pub use section::{
    channel_area,
    channel_centroid,
    channel_min_moment_of_inertia,
    channel_moments_of_inertia,
};
