//! Formula Catalog
//!
//! The closed set of named geometry formulas referenced by component
//! parameter rows. Each family (diameter, length, stiffening) is an enum
//! whose variants map 1:1 to the identifier strings stored in master data,
//! so the set of valid formulas is enumerable and testable in isolation.
//!
//! Constants come from the plant's costing workbook and are fixed: a
//! formula here must reproduce the workbook value, not merely similar
//! geometry math.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::formulas::{DiameterFormula, LengthFormula};
//!
//! let diameter = DiameterFormula::from_code("HUB_DIAMETER_X_1_35").unwrap();
//! let d = diameter.evaluate(472.0, 762.0);
//! assert!((d.overall_mm - 637.2).abs() < 0.1);
//!
//! let length = LengthFormula::from_code("CONICAL_15_DEG").unwrap();
//! let l = length.evaluate(472.0, 762.0, None).unwrap();
//! assert!((l - 140.9).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// Diameters produced by a diameter formula.
///
/// Cylindrical calculators read `overall_mm`; conical calculators read the
/// `start_mm`/`end_mm` pair. Formulas that describe a straight shell set
/// all three to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiameterSet {
    /// Primary diameter for cylindrical shells (mm)
    pub overall_mm: f64,
    /// Small-end diameter for tapered shells (mm)
    pub start_mm: f64,
    /// Large-end diameter for tapered shells (mm)
    pub end_mm: f64,
}

impl DiameterSet {
    /// A straight shell: one diameter throughout
    pub fn uniform(diameter_mm: f64) -> Self {
        DiameterSet {
            overall_mm: diameter_mm,
            start_mm: diameter_mm,
            end_mm: diameter_mm,
        }
    }
}

/// Diameter formula identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiameterFormula {
    /// Plain hub-mounted shell: diameter equals the hub
    #[serde(rename = "HUB_DIAMETER")]
    HubDiameter,
    /// Cone mouth at 1.35 x hub (inlet cones)
    #[serde(rename = "HUB_DIAMETER_X_1_35")]
    HubDiameterX1_35,
    /// Cone mouth at 1.25 x hub (diffusers)
    #[serde(rename = "HUB_DIAMETER_X_1_25")]
    HubDiameterX1_25,
    /// 60 degree conical expansion: end diameter 1.288 x hub
    #[serde(rename = "CONICAL_60_DEG")]
    Conical60Deg,
    /// Fan size plus a 75 mm wall on each side (silencer and casing shells)
    #[serde(rename = "HUB_PLUS_CONSTANT")]
    HubPlusConstant,
}

impl DiameterFormula {
    /// All diameter formulas for iteration
    pub const ALL: [DiameterFormula; 5] = [
        DiameterFormula::HubDiameter,
        DiameterFormula::HubDiameterX1_35,
        DiameterFormula::HubDiameterX1_25,
        DiameterFormula::Conical60Deg,
        DiameterFormula::HubPlusConstant,
    ];

    /// Canonical identifier string as stored in master data
    pub fn code(&self) -> &'static str {
        match self {
            DiameterFormula::HubDiameter => "HUB_DIAMETER",
            DiameterFormula::HubDiameterX1_35 => "HUB_DIAMETER_X_1_35",
            DiameterFormula::HubDiameterX1_25 => "HUB_DIAMETER_X_1_25",
            DiameterFormula::Conical60Deg => "CONICAL_60_DEG",
            DiameterFormula::HubPlusConstant => "HUB_PLUS_CONSTANT",
        }
    }

    /// Parse a master-data identifier string.
    ///
    /// Matching is exact: identifiers are configuration data, and a near
    /// miss is a defect to surface, not to repair.
    pub fn from_code(code: &str) -> QuoteResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.code() == code)
            .ok_or_else(|| QuoteError::unsupported_formula_type("diameter", code))
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DiameterFormula::HubDiameter => "Hub diameter",
            DiameterFormula::HubDiameterX1_35 => "Hub x 1.35",
            DiameterFormula::HubDiameterX1_25 => "Hub x 1.25",
            DiameterFormula::Conical60Deg => "Conical 60 deg",
            DiameterFormula::HubPlusConstant => "Fan size + 150 mm",
        }
    }

    /// Evaluate against fan attributes.
    ///
    /// Pure function of the fan's hub and overall size; every variant
    /// produces a full [`DiameterSet`] so downstream calculators never see
    /// a half-resolved geometry.
    pub fn evaluate(&self, hub_size_mm: f64, fan_size_mm: f64) -> DiameterSet {
        match self {
            DiameterFormula::HubDiameter => DiameterSet::uniform(hub_size_mm),
            DiameterFormula::HubDiameterX1_35 => DiameterSet {
                overall_mm: hub_size_mm * 1.35,
                start_mm: hub_size_mm,
                end_mm: hub_size_mm * 1.35,
            },
            DiameterFormula::HubDiameterX1_25 => DiameterSet {
                overall_mm: hub_size_mm * 1.25,
                start_mm: hub_size_mm,
                end_mm: hub_size_mm * 1.25,
            },
            DiameterFormula::Conical60Deg => {
                let start = hub_size_mm;
                let end = hub_size_mm * 1.288;
                DiameterSet {
                    overall_mm: (start + end) / 2.0,
                    start_mm: start,
                    end_mm: end,
                }
            }
            // Silencer/casing OD is fan size + 75 mm wall * 2
            DiameterFormula::HubPlusConstant => DiameterSet::uniform(fan_size_mm + 75.0 * 2.0),
        }
    }
}

impl std::fmt::Display for DiameterFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Length formula identifiers.
///
/// Only consulted when no fixed length override exists for the
/// fan/component pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthFormula {
    /// Axial length of a 15 degree cone over a 0.16 x hub diameter step
    #[serde(rename = "CONICAL_15_DEG")]
    Conical15Deg,
    /// Axial length of a 3.5 degree cone over a 0.25 x hub diameter step
    #[serde(rename = "CONICAL_3_5_DEG")]
    Conical3_5Deg,
    /// Fan size times the component's configured length multiplier
    #[serde(rename = "LENGTH_D_X_MULTIPLIER")]
    LengthDxMultiplier,
}

impl LengthFormula {
    /// All length formulas for iteration
    pub const ALL: [LengthFormula; 3] = [
        LengthFormula::Conical15Deg,
        LengthFormula::Conical3_5Deg,
        LengthFormula::LengthDxMultiplier,
    ];

    /// Canonical identifier string as stored in master data
    pub fn code(&self) -> &'static str {
        match self {
            LengthFormula::Conical15Deg => "CONICAL_15_DEG",
            LengthFormula::Conical3_5Deg => "CONICAL_3_5_DEG",
            LengthFormula::LengthDxMultiplier => "LENGTH_D_X_MULTIPLIER",
        }
    }

    /// Parse a master-data identifier string (exact match)
    pub fn from_code(code: &str) -> QuoteResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.code() == code)
            .ok_or_else(|| QuoteError::unsupported_formula_type("length", code))
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LengthFormula::Conical15Deg => "Conical 15 deg",
            LengthFormula::Conical3_5Deg => "Conical 3.5 deg",
            LengthFormula::LengthDxMultiplier => "Fan size x multiplier",
        }
    }

    /// Evaluate against fan attributes.
    ///
    /// `length_multiplier` is the component's configured multiplier; it is
    /// required by [`LengthFormula::LengthDxMultiplier`] and ignored by the
    /// conical variants.
    pub fn evaluate(
        &self,
        hub_size_mm: f64,
        fan_size_mm: f64,
        length_multiplier: Option<f64>,
    ) -> QuoteResult<f64> {
        match self {
            // Workbook: =(0.16*$B$2/2)/(TAN(15*PI()/180))
            LengthFormula::Conical15Deg => {
                Ok((0.08 * hub_size_mm) / 15.0_f64.to_radians().tan())
            }
            // Workbook: =(0.25*$B$2/2)/(TAN(3.5*PI()/180))
            LengthFormula::Conical3_5Deg => {
                Ok((0.125 * hub_size_mm) / 3.5_f64.to_radians().tan())
            }
            // Length is the fan size (not hub) times the multiplier
            LengthFormula::LengthDxMultiplier => {
                let multiplier = length_multiplier.ok_or_else(|| {
                    QuoteError::missing_parameter("length_multiplier", self.code())
                })?;
                Ok(fan_size_mm * multiplier)
            }
        }
    }
}

impl std::fmt::Display for LengthFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Stiffening formula identifiers.
///
/// Stiffening factors are pure multipliers on ideal shell mass with a
/// neutral value of 1.0; the workbook's additive coefficient is folded in
/// here so every consumer sees the multiplicative convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StiffeningFormula {
    /// Linear hub-size adjustment: 1 + (0.115 x hub - 124) / 100
    #[serde(rename = "LINEAR_HUB_SCALING_A")]
    LinearHubScalingA,
}

impl StiffeningFormula {
    /// All stiffening formulas for iteration
    pub const ALL: [StiffeningFormula; 1] = [StiffeningFormula::LinearHubScalingA];

    /// Canonical identifier string as stored in master data
    pub fn code(&self) -> &'static str {
        match self {
            StiffeningFormula::LinearHubScalingA => "LINEAR_HUB_SCALING_A",
        }
    }

    /// Parse a master-data identifier string (exact match)
    pub fn from_code(code: &str) -> QuoteResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.code() == code)
            .ok_or_else(|| QuoteError::unsupported_formula_type("stiffening", code))
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StiffeningFormula::LinearHubScalingA => "Linear hub scaling A",
        }
    }

    /// Evaluate against the hub size.
    ///
    /// Workbook: =(0.115*$B$2-124)/100, an adjustment relative to the
    /// plain shell; returned here as the equivalent multiplier.
    pub fn evaluate(&self, hub_size_mm: f64) -> f64 {
        match self {
            StiffeningFormula::LinearHubScalingA => 1.0 + (0.115 * hub_size_mm - 124.0) / 100.0,
        }
    }
}

impl std::fmt::Display for StiffeningFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diameter_codes_roundtrip() {
        for formula in DiameterFormula::ALL {
            assert_eq!(DiameterFormula::from_code(formula.code()).unwrap(), formula);
        }
    }

    #[test]
    fn test_unknown_diameter_code() {
        let err = DiameterFormula::from_code("NOT_A_REAL_TYPE").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMULA_TYPE");
        assert!(err.to_string().contains("NOT_A_REAL_TYPE"));
    }

    #[test]
    fn test_code_matching_is_case_sensitive() {
        assert!(DiameterFormula::from_code("hub_diameter").is_err());
        assert!(LengthFormula::from_code("conical_15_deg").is_err());
    }

    #[test]
    fn test_hub_x_1_35() {
        let d = DiameterFormula::HubDiameterX1_35.evaluate(472.0, 762.0);
        // 472 * 1.35 = 637.2
        assert!((d.overall_mm - 637.2).abs() < 1e-9);
        assert!((d.start_mm - 472.0).abs() < 1e-9);
        assert!((d.end_mm - 637.2).abs() < 1e-9);
    }

    #[test]
    fn test_hub_x_1_25() {
        let d = DiameterFormula::HubDiameterX1_25.evaluate(625.0, 915.0);
        assert!((d.overall_mm - 781.25).abs() < 1e-9);
        assert!((d.start_mm - 625.0).abs() < 1e-9);
    }

    #[test]
    fn test_conical_60_deg() {
        let d = DiameterFormula::Conical60Deg.evaluate(472.0, 762.0);
        // end = 472 * 1.288 = 607.936, overall = (472 + 607.936) / 2
        assert!((d.end_mm - 607.936).abs() < 1e-9);
        assert!((d.overall_mm - 539.968).abs() < 1e-9);
    }

    #[test]
    fn test_hub_plus_constant_uses_fan_size() {
        let d = DiameterFormula::HubPlusConstant.evaluate(472.0, 762.0);
        // 762 + 75*2 = 912
        assert!((d.overall_mm - 912.0).abs() < 1e-9);
        assert_eq!(d.start_mm, d.overall_mm);
        assert_eq!(d.end_mm, d.overall_mm);
    }

    #[test]
    fn test_default_hub_diameter() {
        let d = DiameterFormula::HubDiameter.evaluate(685.0, 1200.0);
        assert_eq!(d.overall_mm, 685.0);
        assert_eq!(d.start_mm, 685.0);
        assert_eq!(d.end_mm, 685.0);
    }

    #[test]
    fn test_conical_15_deg_length() {
        let l = LengthFormula::Conical15Deg
            .evaluate(472.0, 762.0, None)
            .unwrap();
        // (0.08 * 472) / tan(15 deg) = 37.76 / 0.26795 = 140.92
        assert!((l - 140.92).abs() < 0.01);
    }

    #[test]
    fn test_conical_3_5_deg_length() {
        let l = LengthFormula::Conical3_5Deg
            .evaluate(625.0, 915.0, None)
            .unwrap();
        // (0.125 * 625) / tan(3.5 deg) = 78.125 / 0.061163 = 1277.3
        assert!((l - 1277.3).abs() < 0.1);
    }

    #[test]
    fn test_multiplier_length_uses_fan_size() {
        let l = LengthFormula::LengthDxMultiplier
            .evaluate(472.0, 762.0, Some(0.6))
            .unwrap();
        assert!((l - 457.2).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_length_requires_multiplier() {
        let err = LengthFormula::LengthDxMultiplier
            .evaluate(472.0, 762.0, None)
            .unwrap_err();
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert!(err.to_string().contains("length_multiplier"));
    }

    #[test]
    fn test_linear_hub_scaling() {
        // (0.115 * 472 - 124) / 100 = -0.6972 -> multiplier 0.3028
        let f = StiffeningFormula::LinearHubScalingA.evaluate(472.0);
        assert!((f - 0.3028).abs() < 1e-6);

        // Crossover to the neutral multiplier sits near hub 1078
        let neutral = StiffeningFormula::LinearHubScalingA.evaluate(124.0 / 0.115);
        assert!((neutral - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_serde_uses_canonical_codes() {
        let json = serde_json::to_string(&DiameterFormula::HubDiameterX1_35).unwrap();
        assert_eq!(json, "\"HUB_DIAMETER_X_1_35\"");

        let parsed: LengthFormula = serde_json::from_str("\"CONICAL_3_5_DEG\"").unwrap();
        assert_eq!(parsed, LengthFormula::Conical3_5Deg);
    }
}
