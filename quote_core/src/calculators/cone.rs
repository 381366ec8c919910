//! # Cone Surface Calculation
//!
//! Mass and cost of a conical shell: inlet cones, outlet cones and
//! diffusers. The developed surface is taken on the mean diameter over the
//! slant length, so a long shallow diffuser weighs more than its axial
//! length alone would suggest.
//!
//! ## Assumptions
//!
//! - Constant plate thickness over the full shell
//! - Surface = pi * mean diameter * slant length, where the slant is
//!   derived from the axial length and the diameter change
//! - Stiffening rings enter through the resolved stiffening factor
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculators::cone::{calculate, ConeSurfaceInput};
//! use quote_core::rates::builtin_rate_table;
//!
//! let input = ConeSurfaceInput {
//!     component_name: "Inlet Cone".to_string(),
//!     overall_diameter_mm: 637.2,
//!     start_diameter_mm: 472.0,
//!     end_diameter_mm: 637.2,
//!     length_mm: 140.92,
//!     thickness_mm: 3.0,
//!     stiffening_factor: 1.0,
//!     fabrication_waste_factor: 0.15,
//! };
//!
//! let breakdown = calculate(&input, &builtin_rate_table()).unwrap();
//! assert!(breakdown.ideal_mass_kg > 6.0 && breakdown.ideal_mass_kg < 7.0);
//! ```

use serde::{Deserialize, Serialize};

use super::cylinder::{check_positive, check_waste_factor};
use super::{steel_plus_labour_breakdown, ComponentBreakdown};
use crate::errors::QuoteResult;
use crate::rates::RateTable;

/// Input parameters for a conical shell.
///
/// All dimensions in millimetres; factors are dimensionless. The overall
/// diameter is reporting-only; mass uses the start/end pair.
///
/// ## JSON Example
///
/// ```json
/// {
///   "component_name": "Outlet Cone",
///   "overall_diameter_mm": 539.97,
///   "start_diameter_mm": 472.0,
///   "end_diameter_mm": 607.94,
///   "length_mm": 964.68,
///   "thickness_mm": 3.0,
///   "stiffening_factor": 1.0,
///   "fabrication_waste_factor": 0.15
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConeSurfaceInput {
    /// Component display name, carried through to the breakdown
    pub component_name: String,

    /// Representative diameter reported on the breakdown (mm)
    pub overall_diameter_mm: f64,

    /// Diameter at the inlet end in millimetres
    pub start_diameter_mm: f64,

    /// Diameter at the outlet end in millimetres
    pub end_diameter_mm: f64,

    /// Axial length in millimetres
    pub length_mm: f64,

    /// Plate thickness in millimetres
    pub thickness_mm: f64,

    /// Multiplicative stiffening allowance (1.0 = none)
    pub stiffening_factor: f64,

    /// Fabrication waste fraction (0.15 = 15% offcut)
    pub fabrication_waste_factor: f64,
}

impl ConeSurfaceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> QuoteResult<()> {
        check_positive("overall_diameter_mm", self.overall_diameter_mm)?;
        check_positive("start_diameter_mm", self.start_diameter_mm)?;
        check_positive("end_diameter_mm", self.end_diameter_mm)?;
        check_positive("length_mm", self.length_mm)?;
        check_positive("thickness_mm", self.thickness_mm)?;
        check_positive("stiffening_factor", self.stiffening_factor)?;
        check_waste_factor(self.fabrication_waste_factor)?;
        Ok(())
    }

    /// Mean diameter (start + end) / 2 (mm)
    pub fn mean_diameter_mm(&self) -> f64 {
        (self.start_diameter_mm + self.end_diameter_mm) / 2.0
    }

    /// Slant length along the shell surface (mm).
    ///
    /// sqrt(L^2 + ((end - start) / 2)^2): the axial length and the radius
    /// change form the two legs.
    pub fn slant_length_mm(&self) -> f64 {
        let radius_delta = (self.end_diameter_mm - self.start_diameter_mm) / 2.0;
        (self.length_mm.powi(2) + radius_delta.powi(2)).sqrt()
    }

    /// Bare shell mass at a given density (kg), before stiffening.
    pub fn geometric_mass_kg(&self, density_kg_m3: f64) -> f64 {
        std::f64::consts::PI
            * self.mean_diameter_mm()
            * self.slant_length_mm()
            * self.thickness_mm
            * density_kg_m3
            / 1e9
    }
}

/// Calculate the costed mass breakdown for a conical shell.
pub fn calculate(input: &ConeSurfaceInput, rates: &RateTable) -> QuoteResult<ComponentBreakdown> {
    input.validate()?;

    let ideal_mass_kg =
        input.geometric_mass_kg(rates.steel_density_kg_m3) * input.stiffening_factor;

    Ok(steel_plus_labour_breakdown(
        &input.component_name,
        input.overall_diameter_mm,
        input.length_mm,
        input.stiffening_factor,
        ideal_mass_kg,
        input.fabrication_waste_factor,
        rates,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QuoteError;
    use crate::rates::builtin_rate_table;

    fn inlet_cone_472() -> ConeSurfaceInput {
        ConeSurfaceInput {
            component_name: "Inlet Cone".to_string(),
            overall_diameter_mm: 637.2,
            start_diameter_mm: 472.0,
            end_diameter_mm: 637.2,
            length_mm: 140.922238,
            thickness_mm: 3.0,
            stiffening_factor: 1.0,
            fabrication_waste_factor: 0.15,
        }
    }

    #[test]
    fn test_slant_exceeds_axial_length() {
        let input = inlet_cone_472();
        assert!(input.slant_length_mm() > input.length_mm);
        assert!((input.slant_length_mm() - 163.3458).abs() < 1e-3);
        assert!((input.mean_diameter_mm() - 554.6).abs() < 1e-9);
    }

    #[test]
    fn test_hand_computed_inlet_cone_mass() {
        // Mean 554.6mm over a 163.35mm slant in 3mm plate at 7850 kg/m^3.
        let rates = builtin_rate_table();
        let breakdown = calculate(&inlet_cone_472(), &rates).unwrap();

        assert!((breakdown.ideal_mass_kg - 6.7024).abs() < 0.001);
        assert!((breakdown.real_mass_kg - 6.7024 * 1.15).abs() < 0.0012);
        assert_eq!(breakdown.overall_diameter_mm, 637.2);
        assert_eq!(breakdown.total_length_mm, Some(140.922238));
    }

    #[test]
    fn test_degenerate_cone_matches_cylinder() {
        // Equal start and end diameters collapse to a straight shell.
        let rates = builtin_rate_table();
        let cone = ConeSurfaceInput {
            component_name: "Straight".to_string(),
            overall_diameter_mm: 472.0,
            start_diameter_mm: 472.0,
            end_diameter_mm: 472.0,
            length_mm: 320.0,
            thickness_mm: 10.0,
            stiffening_factor: 1.0,
            fabrication_waste_factor: 0.0,
        };
        let cylinder = crate::calculators::cylinder::CylinderSurfaceInput {
            component_name: "Straight".to_string(),
            diameter_mm: 472.0,
            length_mm: 320.0,
            thickness_mm: 10.0,
            stiffening_factor: 1.0,
            fabrication_waste_factor: 0.0,
        };

        let cone_mass = calculate(&cone, &rates).unwrap().ideal_mass_kg;
        let cylinder_mass = crate::calculators::cylinder::calculate(&cylinder, &rates)
            .unwrap()
            .ideal_mass_kg;
        assert!((cone_mass - cylinder_mass).abs() < 1e-9);
    }

    #[test]
    fn test_mass_linear_in_thickness() {
        let rates = builtin_rate_table();
        let single = calculate(&inlet_cone_472(), &rates).unwrap();

        let mut thick = inlet_cone_472();
        thick.thickness_mm = 6.0;
        let double = calculate(&thick, &rates).unwrap();

        let ratio = double.ideal_mass_kg / single.ideal_mass_kg;
        assert!((ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_is_material_plus_labour() {
        let rates = builtin_rate_table();
        let breakdown = calculate(&inlet_cone_472(), &rates).unwrap();
        assert_eq!(
            breakdown.total_cost,
            breakdown.material_cost + breakdown.labour_cost
        );
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        let rates = builtin_rate_table();

        let mut bad = inlet_cone_472();
        bad.end_diameter_mm = 0.0;
        let err = calculate(&bad, &rates).unwrap_err();
        match err {
            QuoteError::InvalidCalculationInput { field, .. } => {
                assert_eq!(field, "end_diameter_mm");
            }
            other => panic!("expected InvalidCalculationInput, got {:?}", other),
        }

        let mut bad = inlet_cone_472();
        bad.length_mm = f64::INFINITY;
        assert!(calculate(&bad, &rates).is_err());
    }
}
