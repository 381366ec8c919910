//! # Parameter Resolution
//!
//! Merges catalog defaults, formula-derived geometry, per-fan overrides,
//! and request-level overrides into one flat [`ResolvedParameters`] value
//! that the mass calculators consume.
//!
//! ## Precedence
//!
//! For each resolved field, the first source that supplies a value wins:
//!
//! - **length_mm**: request override, then the fan/component override row,
//!   then the component's length formula
//! - **stiffening_factor**: fan/component override row, then the
//!   component's stiffening formula, then the neutral 1.0
//! - **thickness_mm / fabrication_waste_factor**: request override, then
//!   the component's defaults
//! - **diameters**: the component's diameter formula, else every diameter
//!   defaults to the hub size
//!
//! Resolution is strict where the mass formula demands it: a surface
//! formula with no derivable length fails with `MissingParameter`, as does
//! a rotor with no blade quantity. Unknown formula codes fail with
//! `UnsupportedFormulaType` rather than being skipped.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::builtin_catalog;
//! use quote_core::resolver::{resolve, ResolveOptions};
//!
//! let catalog = builtin_catalog();
//! let fan = catalog.fan(1).unwrap();
//! let cone = catalog.component_by_code("INLET_CONE").unwrap();
//! let params = catalog.component_parameters(cone.id).unwrap();
//! let override_row = catalog.fan_component_override(fan.id, cone.id);
//!
//! let resolved = resolve(fan, cone, params, override_row, &ResolveOptions::default()).unwrap();
//! assert!(resolved.end_diameter_mm > resolved.start_diameter_mm);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculators::{CostFormula, MassFormula};
use crate::catalog::{Component, ComponentParameters, FanComponentParameters, FanConfiguration};
use crate::errors::{QuoteError, QuoteResult};
use crate::formulas::{DiameterFormula, DiameterSet, LengthFormula, StiffeningFormula};

/// Request-level overrides for one component.
///
/// Every field is optional; `None` falls through to the next source in
/// the precedence chain. `blade_quantity` only matters for the rotor.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thickness_mm": 5.0,
///   "fabrication_waste_factor": 0.2,
///   "length_mm": null,
///   "blade_quantity": null
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolveOptions {
    /// Override plate thickness in millimetres
    pub thickness_mm: Option<f64>,
    /// Override fabrication waste fraction
    pub fabrication_waste_factor: Option<f64>,
    /// Override axial length in millimetres
    pub length_mm: Option<f64>,
    /// Rotor blade count for this quote
    pub blade_quantity: Option<u32>,
}

impl ResolveOptions {
    /// Options carrying only a blade quantity, for rotor resolution.
    pub fn with_blade_quantity(blade_quantity: u32) -> Self {
        ResolveOptions {
            blade_quantity: Some(blade_quantity),
            ..Default::default()
        }
    }
}

/// Fully merged inputs for one component's mass calculation.
///
/// Produced by [`resolve`]; everything a calculator needs is here, so
/// calculators never touch the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedParameters {
    /// Component display name, carried through to the breakdown
    pub component_name: String,
    /// Representative diameter in millimetres
    pub overall_diameter_mm: f64,
    /// Inlet-end diameter in millimetres (equals overall for cylinders)
    pub start_diameter_mm: f64,
    /// Outlet-end diameter in millimetres (equals overall for cylinders)
    pub end_diameter_mm: f64,
    /// Axial length in millimetres; `None` only for formulas that do not
    /// use a length
    pub length_mm: Option<f64>,
    /// Multiplicative stiffening allowance (1.0 = none)
    pub stiffening_factor: f64,
    /// Plate thickness in millimetres
    pub thickness_mm: f64,
    /// Fabrication waste fraction (0.15 = 15% offcut)
    pub fabrication_waste_factor: f64,
    /// Rotor blade count; `None` for non-rotor components
    pub blade_quantity: Option<u32>,
    /// Mass of one rotor blade in kilograms
    pub mass_per_blade_kg: f64,
    /// Hub diameter of the fan being quoted, in millimetres
    pub hub_size_mm: f64,
}

/// Resolve the calculation inputs for one component on one fan.
///
/// Validates every formula code on the parameter row (mass, cost,
/// diameter, length, stiffening) and merges the precedence chain
/// described in the module docs. Pure function: all data comes in through
/// the arguments.
pub fn resolve(
    fan: &FanConfiguration,
    component: &Component,
    params: &ComponentParameters,
    override_row: Option<&FanComponentParameters>,
    options: &ResolveOptions,
) -> QuoteResult<ResolvedParameters> {
    let mass_formula = MassFormula::from_code(&params.mass_formula_type)?;
    let cost_formula = CostFormula::from_code(&params.cost_formula_type)?;
    if !mass_formula.supports_cost_formula(cost_formula) {
        return Err(QuoteError::invalid_calculation_input(
            "cost_formula_type",
            &params.cost_formula_type,
            format!("not applicable to {}", mass_formula.code()),
        ));
    }

    // Diameters: formula if bound, else everything defaults to the hub.
    let diameters = match &params.diameter_formula_type {
        Some(code) => {
            DiameterFormula::from_code(code)?.evaluate(fan.hub_size_mm, fan.fan_size_mm)
        }
        None => DiameterSet::uniform(fan.hub_size_mm),
    };

    // Length: request override, then fan override, then formula.
    let length_mm = match options
        .length_mm
        .or_else(|| override_row.and_then(|row| row.length_mm))
    {
        Some(value) => Some(value),
        None => match &params.length_formula_type {
            Some(code) => Some(LengthFormula::from_code(code)?.evaluate(
                fan.hub_size_mm,
                fan.fan_size_mm,
                params.length_multiplier,
            )?),
            None => None,
        },
    };

    if length_mm.is_none() && mass_formula.requires_length() {
        return Err(QuoteError::missing_parameter("length_mm", &component.name));
    }

    // Stiffening: fan override, then formula, then neutral.
    let stiffening_factor = match override_row.and_then(|row| row.stiffening_factor) {
        Some(value) => value,
        None => match &params.stiffening_formula_type {
            Some(code) => StiffeningFormula::from_code(code)?.evaluate(fan.hub_size_mm),
            None => 1.0,
        },
    };
    if stiffening_factor <= 0.0 || !stiffening_factor.is_finite() {
        return Err(QuoteError::invalid_calculation_input(
            "stiffening_factor",
            stiffening_factor.to_string(),
            "Stiffening factor must be positive",
        ));
    }

    let thickness_mm = options.thickness_mm.unwrap_or(params.default_thickness_mm);

    let fabrication_waste_factor = options
        .fabrication_waste_factor
        .unwrap_or(params.default_fabrication_waste_factor);
    if fabrication_waste_factor < 0.0 || !fabrication_waste_factor.is_finite() {
        return Err(QuoteError::invalid_calculation_input(
            "fabrication_waste_factor",
            fabrication_waste_factor.to_string(),
            "Waste factor must not be negative",
        ));
    }

    // Blade count only constrains the rotor: it must be given and must be
    // one of the counts the fan is built for.
    let blade_quantity = options.blade_quantity;
    if mass_formula == MassFormula::RotorEmpirical {
        match blade_quantity {
            None => {
                return Err(QuoteError::missing_parameter(
                    "blade_quantity",
                    &component.name,
                ));
            }
            Some(qty) if !fan.offers_blade_qty(qty) => {
                return Err(QuoteError::invalid_calculation_input(
                    "blade_quantity",
                    qty.to_string(),
                    format!("Fan {} offers {:?} blades", fan.uid, fan.available_blade_qtys),
                ));
            }
            Some(_) => {}
        }
    }

    Ok(ResolvedParameters {
        component_name: component.name.clone(),
        overall_diameter_mm: diameters.overall_mm,
        start_diameter_mm: diameters.start_mm,
        end_diameter_mm: diameters.end_mm,
        length_mm,
        stiffening_factor,
        thickness_mm,
        fabrication_waste_factor,
        blade_quantity,
        mass_per_blade_kg: fan.mass_per_blade_kg,
        hub_size_mm: fan.hub_size_mm,
    })
}
