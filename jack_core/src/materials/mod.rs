//! # Materials Database
//!
//! Static material table for the diagonal members and the crossbar. The set
//! is closed: every material is a [`JackMaterial`] variant, and name lookups
//! that miss fail with [`CalcError::MaterialNotFound`](crate::errors::CalcError).
//!
//! ## Example
//!
//! ```rust
//! use jack_core::materials::JackMaterial;
//!
//! let aluminum = JackMaterial::from_name("AL 3004 h38").unwrap();
//! let props = aluminum.properties();
//! println!("S_y = {} psi, E = {} psi", props.fy_psi, props.e_psi);
//! ```

pub mod metals;

pub use metals::{JackMaterial, MaterialProperties};

use serde::{Deserialize, Serialize};

/// Material assignment for the two member groups of the jack.
///
/// The crossbar is steel unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberMaterials {
    /// Material of the four diagonal members
    pub diagonal: JackMaterial,
    /// Material of the crossbar
    pub crossbar: JackMaterial,
}

impl MemberMaterials {
    /// Use `diagonal` for the diagonals and steel for the crossbar
    pub fn with_diagonal(diagonal: JackMaterial) -> Self {
        MemberMaterials {
            diagonal,
            crossbar: JackMaterial::Steel1030,
        }
    }
}

impl Default for MemberMaterials {
    fn default() -> Self {
        MemberMaterials::with_diagonal(JackMaterial::Steel1030)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossbar_defaults_to_steel() {
        let materials = MemberMaterials::with_diagonal(JackMaterial::Al3003H16);
        assert_eq!(materials.crossbar, JackMaterial::Steel1030);
        assert_eq!(materials.diagonal, JackMaterial::Al3003H16);
    }
}
