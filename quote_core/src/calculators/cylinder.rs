//! # Cylinder Surface Calculation
//!
//! Mass and cost of a rolled cylindrical shell: casings, hubs, barrels,
//! silencer bodies and screen frames.
//!
//! ## Assumptions
//!
//! - Constant plate thickness over the full shell
//! - Shell mass only: no end plates, flanges or fasteners
//! - Stiffening rings enter through the resolved stiffening factor
//! - Density comes from the rate table, not the input
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculators::cylinder::{calculate, CylinderSurfaceInput};
//! use quote_core::rates::builtin_rate_table;
//!
//! let input = CylinderSurfaceInput {
//!     component_name: "Casing".to_string(),
//!     diameter_mm: 912.0,
//!     length_mm: 457.2,
//!     thickness_mm: 6.0,
//!     stiffening_factor: 1.0,
//!     fabrication_waste_factor: 0.1,
//! };
//!
//! let breakdown = calculate(&input, &builtin_rate_table()).unwrap();
//! assert!(breakdown.real_mass_kg > breakdown.ideal_mass_kg);
//! assert_eq!(breakdown.total_cost, breakdown.material_cost + breakdown.labour_cost);
//! ```

use serde::{Deserialize, Serialize};

use super::{steel_plus_labour_breakdown, ComponentBreakdown};
use crate::errors::{QuoteError, QuoteResult};
use crate::rates::RateTable;

/// Input parameters for a cylindrical shell.
///
/// All dimensions in millimetres; factors are dimensionless.
///
/// ## JSON Example
///
/// ```json
/// {
///   "component_name": "Hub",
///   "diameter_mm": 472.0,
///   "length_mm": 320.0,
///   "thickness_mm": 10.0,
///   "stiffening_factor": 1.0,
///   "fabrication_waste_factor": 0.1
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderSurfaceInput {
    /// Component display name, carried through to the breakdown
    pub component_name: String,

    /// Shell diameter in millimetres
    pub diameter_mm: f64,

    /// Axial length in millimetres
    pub length_mm: f64,

    /// Plate thickness in millimetres
    pub thickness_mm: f64,

    /// Multiplicative stiffening allowance (1.0 = none)
    pub stiffening_factor: f64,

    /// Fabrication waste fraction (0.1 = 10% offcut)
    pub fabrication_waste_factor: f64,
}

impl CylinderSurfaceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> QuoteResult<()> {
        check_positive("diameter_mm", self.diameter_mm)?;
        check_positive("length_mm", self.length_mm)?;
        check_positive("thickness_mm", self.thickness_mm)?;
        check_positive("stiffening_factor", self.stiffening_factor)?;
        check_waste_factor(self.fabrication_waste_factor)?;
        Ok(())
    }

    /// Developed shell area A = pi * d * L (mm^2)
    pub fn shell_area_mm2(&self) -> f64 {
        std::f64::consts::PI * self.diameter_mm * self.length_mm
    }

    /// Bare shell mass at a given density (kg), before stiffening.
    ///
    /// Workbook: =PI()*$B$2*J11*J10*$B$4/10^9
    pub fn geometric_mass_kg(&self, density_kg_m3: f64) -> f64 {
        self.shell_area_mm2() * self.thickness_mm * density_kg_m3 / 1e9
    }
}

/// Calculate the costed mass breakdown for a cylindrical shell.
///
/// Ideal mass is the bare shell times the stiffening factor; waste,
/// material and labour follow the shared steel-plus-labour pipeline.
pub fn calculate(
    input: &CylinderSurfaceInput,
    rates: &RateTable,
) -> QuoteResult<ComponentBreakdown> {
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

pub(crate) fn check_positive(field: &str, value: f64) -> QuoteResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(QuoteError::invalid_calculation_input(
            field,
            value.to_string(),
            "Value must be positive and finite",
        ));
    }
    Ok(())
}

pub(crate) fn check_waste_factor(value: f64) -> QuoteResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuoteError::invalid_calculation_input(
            "fabrication_waste_factor",
            value.to_string(),
            "Waste factor must not be negative",
        ));
    }
    Ok(())
}
