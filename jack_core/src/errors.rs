//! # Error Types
//!
//! Structured error types for jack_core. Every variant carries enough context
//! to tell which quantity or setting was rejected, and the whole enum
//! serializes to JSON so the CLI can emit machine-readable failures.
//!
//! ## Example
//!
//! ```rust
//! use jack_core::errors::{CalcError, CalcResult};
//!
//! fn check_thickness(t_in: f64) -> CalcResult<()> {
//!     if t_in <= 0.0 {
//!         return Err(CalcError::invalid_geometry(
//!             "material_thickness",
//!             t_in,
//!             "Thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_thickness(-0.1).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for jack_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for model, optimization and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A formula is undefined for the supplied geometry (division by zero,
    /// arcsin outside [-1, 1], square root of a negative number, ...)
    #[error("Invalid geometry for '{quantity}': {value} - {reason}")]
    InvalidGeometry {
        quantity: String,
        value: String,
        reason: String,
    },

    /// Material name is not part of the material table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// The optimizer did not produce a converged, feasible design
    #[error("Solver did not converge ({status}): {message}")]
    SolverNonconvergence { status: String, message: String },

    /// A configuration or input value is invalid
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(quantity: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            quantity: quantity.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a SolverNonconvergence error
    pub fn solver_nonconvergence(status: impl Into<String>, message: impl Into<String>) -> Self {
        CalcError::SolverNonconvergence {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::SolverNonconvergence { .. } => "SOLVER_NONCONVERGENCE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_geometry("effective_length", -0.5, "Pins overlap");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidGeometry\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::material_not_found("unobtainium").error_code(), "MATERIAL_NOT_FOUND");
        assert_eq!(
            CalcError::solver_nonconvergence("MaxEvalReached", "budget exhausted").error_code(),
            "SOLVER_NONCONVERGENCE"
        );
    }

    #[test]
    fn test_display_names_quantity() {
        let error = CalcError::invalid_geometry("crossbar_length", 2.0, "Half height exceeds diagonal");
        assert_eq!(
            error.to_string(),
            "Invalid geometry for 'crossbar_length': 2 - Half height exceeds diagonal"
        );
    }
}
