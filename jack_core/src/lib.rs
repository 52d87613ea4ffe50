//! # jack_core - Scissor Jack Design Engine
//!
//! `jack_core` evaluates and optimizes scissor-jack geometries. Given a
//! design vector (diagonal length, channel section, crossbar diameter and
//! hole offset) it computes member forces, five failure-mode safety factors,
//! weight and material cost; a constrained optimizer then searches for the
//! cheapest design meeting every safety target.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over an explicit [`JackConfig`]
//! - **JSON-First**: Inputs, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: Undefined geometry is a typed error, never a silent default
//!
//! ## Quick Start
//!
//! ```rust
//! use jack_core::{safety_factors, DesignVector, JackConfig};
//!
//! let design = DesignVector::from_array([15.0, 2.0, 2.0, 0.25, 1.0, 0.75]);
//! let result = safety_factors(&design, &JackConfig::default()).unwrap();
//! assert!((result.diagonal_force_lb - 9000.0).abs() < 1e-6);
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Closed-form mechanics (section properties, forces, stresses)
//! - [`calculations`] - Safety-factor evaluation and the failure load table
//! - [`optimization`] - Cost objective, constraints and the COBYLA backend
//! - [`materials`] - Metal property table
//! - [`config`] - Load case, targets, policies and solver settings
//! - [`design`] - The six-variable design vector
//! - [`study`] - Config + result container for saved studies
//! - [`file_io`] - Atomic saves and version-checked loads
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod design;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod optimization;
pub mod study;

// Re-export commonly used types at crate root for convenience
pub use calculations::{safety_factors, FailureMode, SafetyResult};
pub use config::{CrossbarForcePolicy, JackConfig, LoadCase, SafetyTargets, SolverSettings};
pub use design::DesignVector;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_config, load_study, save_config, save_study};
pub use materials::{JackMaterial, MemberMaterials};
pub use optimization::{solve, OptimizationResult};
pub use study::{Study, StudyMetadata};
