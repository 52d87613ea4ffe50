//! Sheet and bar metals available for the jack members.
//!
//! Densities are tabulated in lb/ft³ (as published) and converted to lb/in³
//! on lookup, since every geometric quantity in the model is in inches.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Cubic inches per cubic foot
const IN3_PER_FT3: f64 = 1728.0;

/// Metals in the material table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JackMaterial {
    /// Plain carbon steel 1030, cold drawn
    #[serde(rename = "steel 1030 1000C")]
    Steel1030,
    /// Aluminum 3004, H38 temper
    #[serde(rename = "AL 3004 h38")]
    Al3004H38,
    /// Aluminum 3003, H16 temper
    #[serde(rename = "AL 3003 h16")]
    Al3003H16,
    /// Aluminum 5052, H32 temper
    #[serde(rename = "AL 5052 h32")]
    Al5052H32,
    /// Titanium alloy Ti-5Al-2.5Sn
    #[serde(rename = "Ti-5Al 2.5Sn")]
    Ti5Al25Sn,
}

impl JackMaterial {
    /// All materials for listing and selection
    pub const ALL: [JackMaterial; 5] = [
        JackMaterial::Steel1030,
        JackMaterial::Al3004H38,
        JackMaterial::Al3003H16,
        JackMaterial::Al5052H32,
        JackMaterial::Ti5Al25Sn,
    ];

    /// Table name of the material (e.g., "AL 3004 h38")
    pub fn name(&self) -> &'static str {
        match self {
            JackMaterial::Steel1030 => "steel 1030 1000C",
            JackMaterial::Al3004H38 => "AL 3004 h38",
            JackMaterial::Al3003H16 => "AL 3003 h16",
            JackMaterial::Al5052H32 => "AL 5052 h32",
            JackMaterial::Ti5Al25Sn => "Ti-5Al 2.5Sn",
        }
    }

    /// Look a material up by name.
    ///
    /// Matching ignores case, whitespace, `-` and `_`, so `"al-3004-h38"` and
    /// `"AL 3004 h38"` resolve to the same entry. The short alias `"steel"`
    /// resolves to [`JackMaterial::Steel1030`].
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::MaterialNotFound`] when no entry matches.
    pub fn from_name(name: &str) -> CalcResult<Self> {
        let key = normalize(name);
        if key == "STEEL" {
            return Ok(JackMaterial::Steel1030);
        }
        JackMaterial::ALL
            .into_iter()
            .find(|material| normalize(material.name()) == key)
            .ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Tabulated properties for this material
    pub fn properties(&self) -> MaterialProperties {
        // (density lb/ft³, cost $/lb, E psi, S_y psi, S_UT psi)
        let (density_lb_ft3, cost, e, s_y, s_ut) = match self {
            JackMaterial::Steel1030 => (490.0, 2.22, 27_600_000.0, 75_000.0, 97_000.0),
            JackMaterial::Al3004H38 => (170.0, 1.13, 10_400_000.0, 34_000.0, 40_000.0),
            JackMaterial::Al3003H16 => (170.0, 1.13, 10_400_000.0, 24_000.0, 26_000.0),
            JackMaterial::Al5052H32 => (170.0, 1.13, 10_400_000.0, 27_000.0, 34_000.0),
            JackMaterial::Ti5Al25Sn => (280.0, 9.0, 16_500_000.0, 75_000.0, 97_000.0),
        };
        MaterialProperties {
            density_lb_in3: density_lb_ft3 / IN3_PER_FT3,
            cost_per_lb: cost,
            e_psi: e,
            fy_psi: s_y,
            fu_psi: s_ut,
        }
    }
}

impl Default for JackMaterial {
    fn default() -> Self {
        JackMaterial::Steel1030
    }
}

impl std::fmt::Display for JackMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for JackMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JackMaterial::from_name(s)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Mechanical and economic properties of a material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Density (lb/in³)
    pub density_lb_in3: f64,
    /// Raw material cost ($/lb)
    pub cost_per_lb: f64,
    /// Young's modulus E (psi)
    pub e_psi: f64,
    /// Yield strength S_y (psi)
    pub fy_psi: f64,
    /// Ultimate tensile strength S_UT (psi)
    pub fu_psi: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_table_name() {
        for material in JackMaterial::ALL {
            assert_eq!(JackMaterial::from_name(material.name()).unwrap(), material);
        }
    }

    #[test]
    fn test_lookup_is_tolerant() {
        assert_eq!(JackMaterial::from_name("al-3004-h38").unwrap(), JackMaterial::Al3004H38);
        assert_eq!(JackMaterial::from_name("AL  5052 h32").unwrap(), JackMaterial::Al5052H32);
        assert_eq!(JackMaterial::from_name("steel").unwrap(), JackMaterial::Steel1030);
    }

    #[test]
    fn test_unknown_material() {
        let err = JackMaterial::from_name("unobtainium").unwrap_err();
        assert_eq!(err, CalcError::material_not_found("unobtainium"));
    }

    #[test]
    fn test_steel_density_per_cubic_inch() {
        let props = JackMaterial::Steel1030.properties();
        assert_eq!(props.density_lb_in3, 490.0 / 1728.0);
        assert_eq!(props.fy_psi, 75_000.0);
    }

    #[test]
    fn test_serialization_uses_table_name() {
        let json = serde_json::to_string(&JackMaterial::Ti5Al25Sn).unwrap();
        assert_eq!(json, "\"Ti-5Al 2.5Sn\"");
        let roundtrip: JackMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, JackMaterial::Ti5Al25Sn);
    }
}
