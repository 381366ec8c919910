//! # Quote Aggregation
//!
//! Builds a full quote from a request: resolves and calculates every
//! selected component, prices the motor from the dated price book, sums
//! buyout items, and applies the markup exactly once to the combined
//! subtotal.
//!
//! A quote is all-or-nothing: any component that fails to resolve or
//! calculate fails the whole quote with that component's error, so a
//! priced quote never silently omits a selected part.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::{builtin_catalog, MountType};
//! use quote_core::quote::{calculate_quote, MotorSelection, QuoteRequest};
//! use quote_core::rates::builtin_rate_table;
//!
//! let catalog = builtin_catalog();
//! let rates = builtin_rate_table();
//!
//! let fan = catalog.fan_by_uid("Ø762-Ø472").unwrap();
//! let mut request = QuoteRequest::new(fan.id, fan.auto_selected_components.clone());
//! request.motor = Some(MotorSelection {
//!     motor_id: 4,
//!     mount_type: MountType::Foot,
//! });
//!
//! let totals = calculate_quote(&request, &catalog, &rates).unwrap();
//! assert_eq!(totals.components.len(), 4);
//! assert!(totals.grand_total > 0.0);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::calculators::{ComponentBreakdown, MassFormula};
use crate::catalog::{Catalog, MountType};
use crate::errors::{QuoteError, QuoteResult};
use crate::rates::RateTable;
use crate::resolver::{resolve, ResolveOptions};

/// Request-level overrides for one component on a quote.
///
/// Absent fields fall back to the fan override row and then to catalog
/// defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentOverride {
    /// Override plate thickness in millimetres
    pub thickness_mm: Option<f64>,
    /// Override fabrication waste fraction
    pub fabrication_waste_factor: Option<f64>,
    /// Override axial length in millimetres
    pub length_mm: Option<f64>,
}

/// Motor choice on a quote: which motor, mounted how.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MotorSelection {
    pub motor_id: i64,
    pub mount_type: MountType,
}

/// A bought-in line item passed through at cost.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "7f8a2b9e-4c1d-4e5f-9a3b-2c6d8e0f1a2b",
///   "description": "Flexible connector",
///   "unit_cost": 1450.0,
///   "quantity": 2
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuyoutItem {
    /// Stable identity for edit/remove flows
    pub id: Uuid,
    pub description: String,
    pub unit_cost: f64,
    pub quantity: u32,
}

impl BuyoutItem {
    pub fn new(description: impl Into<String>, unit_cost: f64, quantity: u32) -> Self {
        BuyoutItem {
            id: Uuid::new_v4(),
            description: description.into(),
            unit_cost,
            quantity,
        }
    }

    /// Line subtotal: unit cost times quantity.
    pub fn subtotal(&self) -> f64 {
        self.unit_cost * f64::from(self.quantity)
    }
}

/// One quote request: a fan, selected components, and optional extras.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fan_configuration_id": 1,
///   "blade_quantity": 10,
///   "components": [4, 3, 11, 12],
///   "component_overrides": { "Hub": { "thickness_mm": 12.0 } },
///   "motor": { "motor_id": 4, "mount_type": "foot" },
///   "buyout_items": [],
///   "markup_override": 0.2,
///   "quote_date": "2024-12-01"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRequest {
    /// Fan configuration being quoted
    pub fan_configuration_id: i64,

    /// Rotor blade count; required only when the rotor is selected
    #[serde(default)]
    pub blade_quantity: Option<u32>,

    /// Component ids to price, in presentation order
    pub components: Vec<i64>,

    /// Per-component overrides keyed by component name, e.g. "Hub".
    /// Callers identify override targets by display name, not id.
    #[serde(default)]
    pub component_overrides: HashMap<String, ComponentOverride>,

    /// Motor choice, if a motor is being supplied
    #[serde(default)]
    pub motor: Option<MotorSelection>,

    /// Bought-in items passed through at cost
    #[serde(default)]
    pub buyout_items: Vec<BuyoutItem>,

    /// Markup fraction; `None` uses the rate table's default
    #[serde(default)]
    pub markup_override: Option<f64>,

    /// Pricing date for the motor book; `None` means today
    #[serde(default)]
    pub quote_date: Option<NaiveDate>,
}

impl QuoteRequest {
    /// Create a request for a fan and component selection.
    pub fn new(fan_configuration_id: i64, components: Vec<i64>) -> Self {
        QuoteRequest {
            fan_configuration_id,
            blade_quantity: None,
            components,
            component_overrides: HashMap::new(),
            motor: None,
            buyout_items: Vec::new(),
            markup_override: None,
            quote_date: None,
        }
    }

    /// Validate request-level constraints.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.components.is_empty() {
            return Err(QuoteError::invalid_quote_request(
                "At least one component must be selected",
            ));
        }

        for (i, id) in self.components.iter().enumerate() {
            if self.components[..i].contains(id) {
                return Err(QuoteError::invalid_quote_request(format!(
                    "Component id {} is selected more than once",
                    id
                )));
            }
        }

        if let Some(markup) = self.markup_override {
            if !markup.is_finite() || markup < 0.0 {
                return Err(QuoteError::invalid_quote_request(format!(
                    "Markup must be a non-negative fraction, got {}",
                    markup
                )));
            }
        }

        for item in &self.buyout_items {
            if !item.unit_cost.is_finite() || item.unit_cost < 0.0 {
                return Err(QuoteError::invalid_quote_request(format!(
                    "Buyout item '{}' has an invalid unit cost",
                    item.description
                )));
            }
            if item.quantity == 0 {
                return Err(QuoteError::invalid_quote_request(format!(
                    "Buyout item '{}' has zero quantity",
                    item.description
                )));
            }
        }

        Ok(())
    }
}

/// Fully priced quote.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fan_uid": "Ø762-Ø472",
///   "quote_date": "2024-12-01",
///   "components": [],
///   "total_mass_kg": 152.8,
///   "total_material_cost": 3881.7,
///   "total_labour_cost": 995.4,
///   "components_subtotal": 4877.1,
///   "motor_price": 33950.0,
///   "buyout_subtotal": 0.0,
///   "markup_applied": 0.2,
///   "grand_total": 46592.52
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteTotals {
    /// Fan designation, e.g. "Ø762-Ø472"
    pub fan_uid: String,

    /// Date the motor book was priced at
    pub quote_date: NaiveDate,

    /// Per-component breakdowns in request order
    pub components: Vec<ComponentBreakdown>,

    /// Sum of component real masses (kg)
    pub total_mass_kg: f64,

    /// Sum of component material costs
    pub total_material_cost: f64,

    /// Sum of component labour costs
    pub total_labour_cost: f64,

    /// Sum of component total costs
    pub components_subtotal: f64,

    /// Motor list price for the chosen mount; `None` when no motor
    pub motor_price: Option<f64>,

    /// Sum of buyout line subtotals
    pub buyout_subtotal: f64,

    /// Markup fraction applied to the combined subtotal
    pub markup_applied: f64,

    /// (components + motor + buyouts) * (1 + markup)
    pub grand_total: f64,
}

impl QuoteTotals {
    /// Combined subtotal before markup.
    pub fn pre_markup_total(&self) -> f64 {
        self.components_subtotal + self.motor_price.unwrap_or(0.0) + self.buyout_subtotal
    }
}

/// Resolve and calculate one component of a fan.
///
/// Used standalone for what-if pricing and by [`calculate_quote`] for each
/// selected component.
pub fn calculate_component(
    catalog: &Catalog,
    rates: &RateTable,
    fan_configuration_id: i64,
    component_id: i64,
    options: &ResolveOptions,
) -> QuoteResult<ComponentBreakdown> {
    let fan = catalog.fan(fan_configuration_id)?;
    let component = catalog.component(component_id)?;

    if !fan.offers_component(component_id) {
        return Err(QuoteError::invalid_quote_request(format!(
            "Component '{}' is not available on fan {}",
            component.name, fan.uid
        )));
    }

    let params = catalog.component_parameters(component_id)?;
    let override_row = catalog.fan_component_override(fan_configuration_id, component_id);

    let resolved = resolve(fan, component, params, override_row, options)?;
    MassFormula::from_code(&params.mass_formula_type)?.calculate(&resolved, rates)
}

/// Price a full quote.
///
/// Every selected component is resolved and calculated; the motor price is
/// taken from the latest price row on or before the quote date; buyout
/// items pass through at cost. The markup fraction (request override, else
/// the rate table default) is applied once to the combined subtotal.
pub fn calculate_quote(
    request: &QuoteRequest,
    catalog: &Catalog,
    rates: &RateTable,
) -> QuoteResult<QuoteTotals> {
    request.validate()?;

    let fan = catalog.fan(request.fan_configuration_id)?;
    let quote_date = request
        .quote_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let mut components = Vec::with_capacity(request.components.len());
    let mut total_mass_kg = 0.0;
    let mut total_material_cost = 0.0;
    let mut total_labour_cost = 0.0;
    let mut components_subtotal = 0.0;

    for &component_id in &request.components {
        let component = catalog.component(component_id)?;
        let overrides = request.component_overrides.get(&component.name);
        let options = ResolveOptions {
            thickness_mm: overrides.and_then(|o| o.thickness_mm),
            fabrication_waste_factor: overrides.and_then(|o| o.fabrication_waste_factor),
            length_mm: overrides.and_then(|o| o.length_mm),
            blade_quantity: request.blade_quantity,
        };

        let breakdown = calculate_component(
            catalog,
            rates,
            request.fan_configuration_id,
            component_id,
            &options,
        )?;

        total_mass_kg += breakdown.real_mass_kg;
        total_material_cost += breakdown.material_cost;
        total_labour_cost += breakdown.labour_cost;
        components_subtotal += breakdown.total_cost;
        components.push(breakdown);
    }

    let motor_price = match &request.motor {
        Some(selection) => {
            let price = catalog.latest_motor_price(selection.motor_id, quote_date)?;
            Some(price.price_for(selection.mount_type))
        }
        None => None,
    };

    let buyout_subtotal: f64 = request.buyout_items.iter().map(|item| item.subtotal()).sum();

    let markup_applied = request.markup_override.unwrap_or(rates.default_markup);

    let grand_total = (components_subtotal + motor_price.unwrap_or(0.0) + buyout_subtotal)
        * (1.0 + markup_applied);

    Ok(QuoteTotals {
        fan_uid: fan.uid.clone(),
        quote_date,
        components,
        total_mass_kg,
        total_material_cost,
        total_labour_cost,
        components_subtotal,
        motor_price,
        buyout_subtotal,
        markup_applied,
        grand_total,
    })
}
