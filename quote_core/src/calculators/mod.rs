//! # Mass Calculators
//!
//! One calculator per mass formula. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `calculate(input, rates) -> Result<ComponentBreakdown, QuoteError>` -
//!   Pure calculation function
//!
//! The [`MassFormula`] enum is the closed set of supported formulas and
//! doubles as the dispatcher: [`get_calculator`] parses a master-data code
//! into a `MassFormula`, and [`MassFormula::calculate`] builds the right
//! input from resolved parameters and runs it.
//!
//! ## Available Calculators
//!
//! - [`cylinder`] - Rolled cylindrical shell (`CYLINDER_SURFACE`)
//! - [`cone`] - Conical shell on the mean diameter (`CONE_SURFACE`)
//! - [`scd`] - Self-closing door: shell plus end plate (`SCD_MASS`)
//! - [`rotor`] - Empirical rotor assembly (`ROTOR_EMPIRICAL`)
//!
//! ## Costing
//!
//! Every breakdown reports the same pipeline: ideal mass (geometry times
//! stiffening), real mass (ideal plus fabrication waste), feedstock mass
//! (what is bought, equal to real), then material cost from feedstock and
//! labour cost from real mass. The rotor prices its bought-in parts
//! instead of plate feedstock but reports through the same shape.

pub mod cone;
pub mod cylinder;
pub mod rotor;
pub mod scd;

use serde::{Deserialize, Serialize};

// Re-export input types
pub use cone::ConeSurfaceInput;
pub use cylinder::CylinderSurfaceInput;
pub use rotor::RotorEmpiricalInput;
pub use scd::ScdMassInput;

use crate::errors::{QuoteError, QuoteResult};
use crate::rates::RateTable;
use crate::resolver::ResolvedParameters;

/// The closed set of mass formulas.
///
/// Codes are matched case-sensitively against master data; an unknown code
/// is an `UnsupportedFormulaType` error, never a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassFormula {
    /// Rolled cylindrical shell
    #[serde(rename = "CYLINDER_SURFACE")]
    CylinderSurface,
    /// Conical shell on the mean diameter
    #[serde(rename = "CONE_SURFACE")]
    ConeSurface,
    /// Cylinder plus one end plate
    #[serde(rename = "SCD_MASS")]
    ScdMass,
    /// Empirical rotor assembly
    #[serde(rename = "ROTOR_EMPIRICAL")]
    RotorEmpirical,
}

impl MassFormula {
    /// All mass formulas for iteration
    pub const ALL: [MassFormula; 4] = [
        MassFormula::CylinderSurface,
        MassFormula::ConeSurface,
        MassFormula::ScdMass,
        MassFormula::RotorEmpirical,
    ];

    /// Canonical identifier string as stored in master data
    pub fn code(&self) -> &'static str {
        match self {
            MassFormula::CylinderSurface => "CYLINDER_SURFACE",
            MassFormula::ConeSurface => "CONE_SURFACE",
            MassFormula::ScdMass => "SCD_MASS",
            MassFormula::RotorEmpirical => "ROTOR_EMPIRICAL",
        }
    }

    /// Parse a master-data identifier string (exact match)
    pub fn from_code(code: &str) -> QuoteResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.code() == code)
            .ok_or_else(|| QuoteError::unsupported_formula_type("mass", code))
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MassFormula::CylinderSurface => "Cylinder surface",
            MassFormula::ConeSurface => "Cone surface",
            MassFormula::ScdMass => "Self-closing door",
            MassFormula::RotorEmpirical => "Rotor empirical",
        }
    }

    /// Whether this formula needs an axial length to evaluate.
    pub fn requires_length(&self) -> bool {
        match self {
            MassFormula::CylinderSurface | MassFormula::ConeSurface | MassFormula::ScdMass => true,
            MassFormula::RotorEmpirical => false,
        }
    }

    /// Whether a cost formula can price this formula's output.
    pub fn supports_cost_formula(&self, cost: CostFormula) -> bool {
        match self {
            MassFormula::RotorEmpirical => cost == CostFormula::RotorEmpiricalCost,
            _ => cost == CostFormula::SteelPlusLabour,
        }
    }

    /// Run the calculator for this formula against resolved parameters.
    ///
    /// Builds the formula's input type from `resolved` and delegates to the
    /// per-formula `calculate` function.
    pub fn calculate(
        &self,
        resolved: &ResolvedParameters,
        rates: &RateTable,
    ) -> QuoteResult<ComponentBreakdown> {
        match self {
            MassFormula::CylinderSurface => {
                let input = CylinderSurfaceInput {
                    component_name: resolved.component_name.clone(),
                    diameter_mm: resolved.overall_diameter_mm,
                    length_mm: required_length(resolved)?,
                    thickness_mm: resolved.thickness_mm,
                    stiffening_factor: resolved.stiffening_factor,
                    fabrication_waste_factor: resolved.fabrication_waste_factor,
                };
                cylinder::calculate(&input, rates)
            }
            MassFormula::ConeSurface => {
                let input = ConeSurfaceInput {
                    component_name: resolved.component_name.clone(),
                    overall_diameter_mm: resolved.overall_diameter_mm,
                    start_diameter_mm: resolved.start_diameter_mm,
                    end_diameter_mm: resolved.end_diameter_mm,
                    length_mm: required_length(resolved)?,
                    thickness_mm: resolved.thickness_mm,
                    stiffening_factor: resolved.stiffening_factor,
                    fabrication_waste_factor: resolved.fabrication_waste_factor,
                };
                cone::calculate(&input, rates)
            }
            MassFormula::ScdMass => {
                let input = ScdMassInput {
                    component_name: resolved.component_name.clone(),
                    diameter_mm: resolved.overall_diameter_mm,
                    length_mm: required_length(resolved)?,
                    thickness_mm: resolved.thickness_mm,
                    stiffening_factor: resolved.stiffening_factor,
                    fabrication_waste_factor: resolved.fabrication_waste_factor,
                };
                scd::calculate(&input, rates)
            }
            MassFormula::RotorEmpirical => {
                let blade_quantity = resolved.blade_quantity.ok_or_else(|| {
                    QuoteError::missing_parameter("blade_quantity", &resolved.component_name)
                })?;
                let input = RotorEmpiricalInput {
                    component_name: resolved.component_name.clone(),
                    hub_size_mm: resolved.hub_size_mm,
                    blade_quantity,
                    mass_per_blade_kg: resolved.mass_per_blade_kg,
                };
                rotor::calculate(&input, rates)
            }
        }
    }
}

impl std::fmt::Display for MassFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn required_length(resolved: &ResolvedParameters) -> QuoteResult<f64> {
    resolved
        .length_mm
        .ok_or_else(|| QuoteError::missing_parameter("length_mm", &resolved.component_name))
}

/// The closed set of costing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostFormula {
    /// Plate feedstock at the steel rate plus fabrication labour
    #[serde(rename = "STEEL_PLUS_LABOUR")]
    SteelPlusLabour,
    /// Empirical bought-in parts pricing for the rotor
    #[serde(rename = "ROTOR_EMPIRICAL_COST")]
    RotorEmpiricalCost,
}

impl CostFormula {
    /// All cost formulas for iteration
    pub const ALL: [CostFormula; 2] = [CostFormula::SteelPlusLabour, CostFormula::RotorEmpiricalCost];

    /// Canonical identifier string as stored in master data
    pub fn code(&self) -> &'static str {
        match self {
            CostFormula::SteelPlusLabour => "STEEL_PLUS_LABOUR",
            CostFormula::RotorEmpiricalCost => "ROTOR_EMPIRICAL_COST",
        }
    }

    /// Parse a master-data identifier string (exact match)
    pub fn from_code(code: &str) -> QuoteResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.code() == code)
            .ok_or_else(|| QuoteError::unsupported_formula_type("cost", code))
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CostFormula::SteelPlusLabour => "Steel plus labour",
            CostFormula::RotorEmpiricalCost => "Rotor empirical cost",
        }
    }
}

impl std::fmt::Display for CostFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Factory: parse a mass formula code into its calculator.
///
/// # Example
///
/// ```rust
/// use quote_core::calculators::get_calculator;
///
/// let formula = get_calculator("CYLINDER_SURFACE").unwrap();
/// assert!(formula.requires_length());
///
/// assert!(get_calculator("NOT_A_REAL_TYPE").is_err());
/// ```
pub fn get_calculator(mass_formula_type: &str) -> QuoteResult<MassFormula> {
    MassFormula::from_code(mass_formula_type)
}

/// Costed mass breakdown for one component.
///
/// ## JSON Example
///
/// ```json
/// {
///   "component_name": "Inlet Cone",
///   "overall_diameter_mm": 637.2,
///   "total_length_mm": 140.92,
///   "stiffening_factor": 1.0,
///   "ideal_mass_kg": 6.7,
///   "real_mass_kg": 7.71,
///   "feedstock_mass_kg": 7.71,
///   "material_cost": 195.77,
///   "labour_cost": 50.21,
///   "total_cost": 245.98
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentBreakdown {
    /// Component display name
    pub component_name: String,

    /// Representative diameter in millimetres
    pub overall_diameter_mm: f64,

    /// Axial length in millimetres; `None` when the formula has no length
    pub total_length_mm: Option<f64>,

    /// Stiffening factor applied; `None` when the formula has no shell
    pub stiffening_factor: Option<f64>,

    /// Mass of the bare geometry including stiffening (kg)
    pub ideal_mass_kg: f64,

    /// Mass including fabrication waste (kg)
    ///
    /// Equals ideal mass exactly when the waste factor is zero.
    pub real_mass_kg: f64,

    /// Mass of material bought in (kg), equal to real mass
    pub feedstock_mass_kg: f64,

    /// Feedstock priced at the material rate
    pub material_cost: f64,

    /// Real mass priced at the fabrication labour rate
    pub labour_cost: f64,

    /// Material plus labour, exactly
    pub total_cost: f64,
}

impl ComponentBreakdown {
    /// Total cost per kilogram of real mass.
    pub fn cost_per_kg(&self) -> f64 {
        if self.real_mass_kg > 0.0 {
            self.total_cost / self.real_mass_kg
        } else {
            0.0
        }
    }
}

/// Shared steel-plus-labour costing for the shell calculators.
///
/// Takes the geometry mass with stiffening already applied and runs the
/// waste, material and labour pipeline.
pub(crate) fn steel_plus_labour_breakdown(
    component_name: &str,
    overall_diameter_mm: f64,
    total_length_mm: f64,
    stiffening_factor: f64,
    ideal_mass_kg: f64,
    fabrication_waste_factor: f64,
    rates: &RateTable,
) -> ComponentBreakdown {
    let real_mass_kg = ideal_mass_kg * (1.0 + fabrication_waste_factor);
    let feedstock_mass_kg = real_mass_kg;
    let material_cost = feedstock_mass_kg * rates.steel_cost_per_kg;
    let labour_cost = real_mass_kg * rates.labour_cost_per_kg();

    ComponentBreakdown {
        component_name: component_name.to_string(),
        overall_diameter_mm,
        total_length_mm: Some(total_length_mm),
        stiffening_factor: Some(stiffening_factor),
        ideal_mass_kg,
        real_mass_kg,
        feedstock_mass_kg,
        material_cost,
        labour_cost,
        total_cost: material_cost + labour_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::builtin_rate_table;

    #[test]
    fn test_mass_formula_codes() {
        for formula in MassFormula::ALL {
            assert_eq!(MassFormula::from_code(formula.code()).unwrap(), formula);
        }

        // Codes are case-sensitive.
        let err = MassFormula::from_code("cylinder_surface").unwrap_err();
        match err {
            QuoteError::UnsupportedFormulaType { kind, formula_type } => {
                assert_eq!(kind, "mass");
                assert_eq!(formula_type, "cylinder_surface");
            }
            other => panic!("expected UnsupportedFormulaType, got {:?}", other),
        }
    }

    #[test]
    fn test_factory_rejects_unknown_type() {
        let err = get_calculator("NOT_A_REAL_TYPE").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMULA_TYPE");
    }

    #[test]
    fn test_requires_length() {
        assert!(MassFormula::CylinderSurface.requires_length());
        assert!(MassFormula::ConeSurface.requires_length());
        assert!(MassFormula::ScdMass.requires_length());
        assert!(!MassFormula::RotorEmpirical.requires_length());
    }

    #[test]
    fn test_cost_formula_pairing() {
        assert!(MassFormula::CylinderSurface.supports_cost_formula(CostFormula::SteelPlusLabour));
        assert!(!MassFormula::CylinderSurface
            .supports_cost_formula(CostFormula::RotorEmpiricalCost));
        assert!(MassFormula::RotorEmpirical.supports_cost_formula(CostFormula::RotorEmpiricalCost));
        assert!(!MassFormula::RotorEmpirical.supports_cost_formula(CostFormula::SteelPlusLabour));
    }

    #[test]
    fn test_mass_formula_serde_codes() {
        let json = serde_json::to_string(&MassFormula::ScdMass).unwrap();
        assert_eq!(json, "\"SCD_MASS\"");
        let back: CostFormula = serde_json::from_str("\"ROTOR_EMPIRICAL_COST\"").unwrap();
        assert_eq!(back, CostFormula::RotorEmpiricalCost);
    }

    #[test]
    fn test_dispatch_through_resolved_parameters() {
        use crate::resolver::ResolvedParameters;

        let rates = builtin_rate_table();
        let resolved = ResolvedParameters {
            component_name: "Hub".to_string(),
            overall_diameter_mm: 472.0,
            start_diameter_mm: 472.0,
            end_diameter_mm: 472.0,
            length_mm: Some(320.0),
            stiffening_factor: 1.0,
            thickness_mm: 10.0,
            fabrication_waste_factor: 0.1,
            blade_quantity: None,
            mass_per_blade_kg: 3.4,
            hub_size_mm: 472.0,
        };

        let breakdown = MassFormula::CylinderSurface
            .calculate(&resolved, &rates)
            .unwrap();
        assert_eq!(breakdown.component_name, "Hub");
        assert!((breakdown.ideal_mass_kg - 37.2487).abs() < 1e-3);
        assert!(
            (breakdown.total_cost - (breakdown.material_cost + breakdown.labour_cost)).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_cost_per_kg() {
        let breakdown = ComponentBreakdown {
            component_name: "Test".to_string(),
            overall_diameter_mm: 100.0,
            total_length_mm: Some(100.0),
            stiffening_factor: Some(1.0),
            ideal_mass_kg: 10.0,
            real_mass_kg: 11.0,
            feedstock_mass_kg: 11.0,
            material_cost: 279.4,
            labour_cost: 71.66,
            total_cost: 351.06,
        };
        assert!((breakdown.cost_per_kg() - 31.914545454545454).abs() < 1e-9);
    }
}
