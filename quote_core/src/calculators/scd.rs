//! # Self-Closing Door Calculation
//!
//! Mass and cost of the self-closing door assembly: a short cylindrical
//! shell closed by one circular plate. Both parts are cut from the same
//! plate thickness.
//!
//! ## Assumptions
//!
//! - Shell plus exactly one end plate, no hinge or counterweight hardware
//! - The resolved stiffening factor carries the hub-size scaling of the
//!   door internals
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculators::scd::{calculate, ScdMassInput};
//! use quote_core::rates::builtin_rate_table;
//!
//! let input = ScdMassInput {
//!     component_name: "Self Closing Door".to_string(),
//!     diameter_mm: 472.0,
//!     length_mm: 180.0,
//!     thickness_mm: 2.0,
//!     stiffening_factor: 1.0,
//!     fabrication_waste_factor: 0.1,
//! };
//!
//! let breakdown = calculate(&input, &builtin_rate_table()).unwrap();
//! assert!(breakdown.ideal_mass_kg > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use super::cylinder::{check_positive, check_waste_factor};
use super::{steel_plus_labour_breakdown, ComponentBreakdown};
use crate::errors::QuoteResult;
use crate::rates::RateTable;

/// Input parameters for a self-closing door.
///
/// All dimensions in millimetres; factors are dimensionless.
///
/// ## JSON Example
///
/// ```json
/// {
///   "component_name": "Self Closing Door",
///   "diameter_mm": 472.0,
///   "length_mm": 180.0,
///   "thickness_mm": 2.0,
///   "stiffening_factor": 0.3028,
///   "fabrication_waste_factor": 0.1
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScdMassInput {
    /// Component display name, carried through to the breakdown
    pub component_name: String,

    /// Door diameter in millimetres (the hub bore it closes)
    pub diameter_mm: f64,

    /// Shell length in millimetres
    pub length_mm: f64,

    /// Plate thickness in millimetres
    pub thickness_mm: f64,

    /// Multiplicative scaling for the door internals (1.0 = none)
    pub stiffening_factor: f64,

    /// Fabrication waste fraction (0.1 = 10% offcut)
    pub fabrication_waste_factor: f64,
}

impl ScdMassInput {
    /// Validate input parameters.
    pub fn validate(&self) -> QuoteResult<()> {
        check_positive("diameter_mm", self.diameter_mm)?;
        check_positive("length_mm", self.length_mm)?;
        check_positive("thickness_mm", self.thickness_mm)?;
        check_positive("stiffening_factor", self.stiffening_factor)?;
        check_waste_factor(self.fabrication_waste_factor)?;
        Ok(())
    }

    /// Shell area plus one end plate (mm^2).
    ///
    /// Workbook: =PI()*$B$2*J11 + (PI()/4)*$B$2^2
    pub fn developed_area_mm2(&self) -> f64 {
        let shell = std::f64::consts::PI * self.diameter_mm * self.length_mm;
        let end_plate = std::f64::consts::FRAC_PI_4 * self.diameter_mm.powi(2);
        shell + end_plate
    }

    /// Bare door mass at a given density (kg), before scaling.
    pub fn geometric_mass_kg(&self, density_kg_m3: f64) -> f64 {
        self.developed_area_mm2() * self.thickness_mm * density_kg_m3 / 1e9
    }
}

/// Calculate the costed mass breakdown for a self-closing door.
pub fn calculate(input: &ScdMassInput, rates: &RateTable) -> QuoteResult<ComponentBreakdown> {
    input.validate()?;

    let ideal_mass_kg =
        input.geometric_mass_kg(rates.steel_density_kg_m3) * input.stiffening_factor;

    Ok(steel_plus_labour_breakdown(
        &input.component_name,
        input.diameter_mm,
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
    use crate::rates::builtin_rate_table;

    fn door_472() -> ScdMassInput {
        ScdMassInput {
            component_name: "Self Closing Door".to_string(),
            diameter_mm: 472.0,
            length_mm: 180.0,
            thickness_mm: 2.0,
            stiffening_factor: 1.0,
            fabrication_waste_factor: 0.0,
        }
    }

    #[test]
    fn test_hand_computed_mass() {
        // Shell pi*472*180 = 266,910 mm^2, plate pi/4*472^2 = 174,974 mm^2,
        // in 2mm plate at 7850 kg/m^3.
        let rates = builtin_rate_table();
        let breakdown = calculate(&door_472(), &rates).unwrap();
        assert!((breakdown.ideal_mass_kg - 6.9376).abs() < 1e-3);
    }

    #[test]
    fn test_end_plate_exceeds_bare_shell() {
        // The same dimensions as a plain cylinder weigh more here.
        let rates = builtin_rate_table();
        let door = calculate(&door_472(), &rates).unwrap();

        let shell = crate::calculators::cylinder::CylinderSurfaceInput {
            component_name: "Shell".to_string(),
            diameter_mm: 472.0,
            length_mm: 180.0,
            thickness_mm: 2.0,
            stiffening_factor: 1.0,
            fabrication_waste_factor: 0.0,
        };
        let shell_mass = crate::calculators::cylinder::calculate(&shell, &rates)
            .unwrap()
            .ideal_mass_kg;

        assert!(door.ideal_mass_kg > shell_mass);
        // The difference is exactly the end plate.
        let plate_mass = std::f64::consts::FRAC_PI_4 * 472.0_f64.powi(2) * 2.0 * 7850.0 / 1e9;
        assert!((door.ideal_mass_kg - shell_mass - plate_mass).abs() < 1e-9);
    }

    #[test]
    fn test_scaling_factor_applies() {
        let rates = builtin_rate_table();
        let plain = calculate(&door_472(), &rates).unwrap();

        let mut scaled = door_472();
        scaled.stiffening_factor = 0.3028;
        let breakdown = calculate(&scaled, &rates).unwrap();

        let ratio = breakdown.ideal_mass_kg / plain.ideal_mass_kg;
        assert!((ratio - 0.3028).abs() < 1e-12);
        assert_eq!(breakdown.stiffening_factor, Some(0.3028));
    }

    #[test]
    fn test_total_is_material_plus_labour() {
        let rates = builtin_rate_table();
        let mut door = door_472();
        door.fabrication_waste_factor = 0.1;
        let breakdown = calculate(&door, &rates).unwrap();
        assert_eq!(
            breakdown.total_cost,
            breakdown.material_cost + breakdown.labour_cost
        );
    }

    #[test]
    fn test_validation_rejects_zero_thickness() {
        let rates = builtin_rate_table();
        let mut bad = door_472();
        bad.thickness_mm = 0.0;
        let err = calculate(&bad, &rates).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CALCULATION_INPUT");
    }
}
