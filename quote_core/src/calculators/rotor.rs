//! # Rotor Empirical Calculation
//!
//! Mass and cost of the bladed rotor assembly. The rotor is not a rolled
//! shell: its mass curve was fitted against built rotors and scales with
//! the square of hub size, plus the blade set. Costing prices the machined
//! hub, taperlock bushes, door items and blades individually instead of
//! plate feedstock.
//!
//! ## Assumptions
//!
//! - Hub machining and balancing scale with (hub / 665)^2
//! - Four taperlock bushes per rotor
//! - Blade count validated upstream against the fan configuration
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculators::rotor::{calculate, RotorEmpiricalInput};
//! use quote_core::rates::builtin_rate_table;
//!
//! let input = RotorEmpiricalInput {
//!     component_name: "Rotor".to_string(),
//!     hub_size_mm: 472.0,
//!     blade_quantity: 10,
//!     mass_per_blade_kg: 3.4,
//! };
//!
//! let breakdown = calculate(&input, &builtin_rate_table()).unwrap();
//! assert!(breakdown.real_mass_kg > 34.0); // at least the blade set
//! ```

use serde::{Deserialize, Serialize};

use super::cylinder::check_positive;
use super::ComponentBreakdown;
use crate::errors::{QuoteError, QuoteResult};
use crate::rates::RateTable;

/// Hub diameter the empirical curves were fitted at (mm).
const HUB_SCALING_REFERENCE_MM: f64 = 665.0;

/// Input parameters for the rotor assembly.
///
/// ## JSON Example
///
/// ```json
/// {
///   "component_name": "Rotor",
///   "hub_size_mm": 472.0,
///   "blade_quantity": 10,
///   "mass_per_blade_kg": 3.4
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotorEmpiricalInput {
    /// Component display name, carried through to the breakdown
    pub component_name: String,

    /// Hub diameter in millimetres
    pub hub_size_mm: f64,

    /// Number of blades fitted
    pub blade_quantity: u32,

    /// Mass of one blade in kilograms
    pub mass_per_blade_kg: f64,
}

impl RotorEmpiricalInput {
    /// Validate input parameters.
    pub fn validate(&self) -> QuoteResult<()> {
        check_positive("hub_size_mm", self.hub_size_mm)?;
        check_positive("mass_per_blade_kg", self.mass_per_blade_kg)?;
        if self.blade_quantity == 0 {
            return Err(QuoteError::invalid_calculation_input(
                "blade_quantity",
                self.blade_quantity.to_string(),
                "Rotor needs at least one blade",
            ));
        }
        Ok(())
    }

    /// Dimensionless hub scaling (hub / 665)^2.
    pub fn hub_scaling_factor(&self) -> f64 {
        (self.hub_size_mm / HUB_SCALING_REFERENCE_MM).powi(2)
    }

    /// Total mass of the blade set (kg).
    pub fn blade_set_mass_kg(&self) -> f64 {
        f64::from(self.blade_quantity) * self.mass_per_blade_kg
    }
}

/// Calculate the costed mass breakdown for the rotor assembly.
///
/// The empirical mass is final: there is no separate waste allowance, so
/// ideal, real and feedstock masses coincide and the breakdown carries no
/// length or stiffening factor.
pub fn calculate(input: &RotorEmpiricalInput, rates: &RateTable) -> QuoteResult<ComponentBreakdown> {
    input.validate()?;

    let hs = input.hub_scaling_factor();
    let blade_set = input.blade_set_mass_kg();

    // Workbook: =(19.5)*($B$2/665)^2*2+8.6+2+$B$4*$C$4+5*($B$2/665)^2
    let machined_hub_mass = 19.5 * hs * 2.0;
    let real_mass_kg = machined_hub_mass + 8.6 + 2.0 + blade_set + 5.0 * hs;

    // Workbook: =(19.5)*($B$2/665)^2*Rates!B16*2+4*Rates!B14+Rates!B20
    //           +$B$4*$C$4*Rates!$B$18+(4226)*($B$2/665)^2
    let material_cost = machined_hub_mass * rates.en8_machining_cost_per_kg
        + 4.0 * rates.taperlock_bush_cost_per_item
        + rates.scd_items_cost_per_item
        + blade_set * rates.ali_blades_cost_per_kg
        + 4226.0 * hs;

    let labour_cost = real_mass_kg * rates.labour_cost_per_kg();

    Ok(ComponentBreakdown {
        component_name: input.component_name.clone(),
        overall_diameter_mm: input.hub_size_mm,
        total_length_mm: None,
        stiffening_factor: None,
        ideal_mass_kg: real_mass_kg,
        real_mass_kg,
        feedstock_mass_kg: real_mass_kg,
        material_cost,
        labour_cost,
        total_cost: material_cost + labour_cost,
    })
}
