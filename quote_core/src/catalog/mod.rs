//! # Product Catalog
//!
//! Reference data for quoting: the fan range, the component set with its
//! formula bindings, per-fan override rows, and the motor price book.
//!
//! The [`Catalog`] container indexes everything by id (plus uid/code for
//! human-friendly lookup) and is the single data source the resolver and
//! quote builder read from. Lookups return typed errors naming the missing
//! record, never panics.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::builtin_catalog;
//!
//! let catalog = builtin_catalog();
//! let fan = catalog.fan_by_uid("Ø762-Ø472").unwrap();
//! assert_eq!(fan.hub_size_mm, 472.0);
//!
//! let hub = catalog.component_by_code("HUB").unwrap();
//! let params = catalog.component_parameters(hub.id).unwrap();
//! assert_eq!(params.mass_formula_type, "CYLINDER_SURFACE");
//! ```

pub mod components;
pub mod fans;
pub mod motors;

// Re-export fan types
pub use fans::{builtin_fan_range, FanConfiguration};

// Re-export component types
pub use components::{
    builtin_component_catalog, builtin_fan_component_overrides, load_components_from_csv,
    Component, ComponentParameters, FanComponentParameters,
};

// Re-export motor types
pub use motors::{
    builtin_motor_prices, builtin_motors, load_motor_prices_from_csv, Motor, MotorPrice,
    MountType,
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::errors::{QuoteError, QuoteResult};

/// Indexed quoting reference data.
///
/// Holds fans, components with their formula parameter rows, per-fan
/// overrides, and motors with dated price histories. Populate via the
/// `insert_*` methods or start from [`builtin_catalog`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fans: HashMap<i64, FanConfiguration>,
    fans_by_uid: HashMap<String, i64>,
    components: HashMap<i64, Component>,
    components_by_code: HashMap<String, i64>,
    component_parameters: HashMap<i64, ComponentParameters>,
    fan_component_parameters: HashMap<(i64, i64), FanComponentParameters>,
    motors: HashMap<i64, Motor>,
    motor_prices: HashMap<i64, Vec<MotorPrice>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_fan(&mut self, fan: FanConfiguration) {
        self.fans_by_uid.insert(fan.uid.to_uppercase(), fan.id);
        self.fans.insert(fan.id, fan);
    }

    /// Insert a component together with its parameter row.
    pub fn insert_component(&mut self, component: Component, parameters: ComponentParameters) {
        self.components_by_code
            .insert(component.code.to_uppercase(), component.id);
        self.component_parameters
            .insert(component.id, parameters);
        self.components.insert(component.id, component);
    }

    pub fn insert_fan_component_override(&mut self, row: FanComponentParameters) {
        self.fan_component_parameters
            .insert((row.fan_configuration_id, row.component_id), row);
    }

    pub fn insert_motor(&mut self, motor: Motor) {
        self.motors.insert(motor.id, motor);
    }

    pub fn insert_motor_price(&mut self, price: MotorPrice) {
        self.motor_prices
            .entry(price.motor_id)
            .or_default()
            .push(price);
    }

    /// Look up a fan configuration by id.
    pub fn fan(&self, id: i64) -> QuoteResult<&FanConfiguration> {
        self.fans
            .get(&id)
            .ok_or_else(|| QuoteError::fan_configuration_not_found(format!("id {}", id)))
    }

    /// Look up a fan configuration by its uid, e.g. "Ø762-Ø472".
    ///
    /// Matching is case-insensitive.
    pub fn fan_by_uid(&self, uid: &str) -> QuoteResult<&FanConfiguration> {
        let id = self
            .fans_by_uid
            .get(&uid.to_uppercase())
            .ok_or_else(|| QuoteError::fan_configuration_not_found(uid))?;
        self.fan(*id)
    }

    /// Look up a component by id.
    pub fn component(&self, id: i64) -> QuoteResult<&Component> {
        self.components
            .get(&id)
            .ok_or_else(|| QuoteError::component_not_found(format!("id {}", id)))
    }

    /// Look up a component by its machine code, e.g. "INLET_CONE".
    ///
    /// Matching is case-insensitive.
    pub fn component_by_code(&self, code: &str) -> QuoteResult<&Component> {
        let id = self
            .components_by_code
            .get(&code.to_uppercase())
            .ok_or_else(|| QuoteError::component_not_found(code))?;
        self.component(*id)
    }

    /// Fetch the formula parameter row for a component.
    pub fn component_parameters(&self, component_id: i64) -> QuoteResult<&ComponentParameters> {
        self.component_parameters.get(&component_id).ok_or_else(|| {
            QuoteError::component_not_found(format!(
                "parameters for component id {}",
                component_id
            ))
        })
    }

    /// Fetch the override row for a fan/component pair, if one exists.
    pub fn fan_component_override(
        &self,
        fan_configuration_id: i64,
        component_id: i64,
    ) -> Option<&FanComponentParameters> {
        self.fan_component_parameters
            .get(&(fan_configuration_id, component_id))
    }

    /// Look up a motor by id.
    pub fn motor(&self, id: i64) -> QuoteResult<&Motor> {
        self.motors
            .get(&id)
            .ok_or_else(|| QuoteError::motor_not_found(format!("id {}", id)))
    }

    /// Pick the motor price in force on a date.
    ///
    /// Returns the price row with the latest `date_effective` on or before
    /// `on_date`. A motor whose price history starts after `on_date` has no
    /// price in force and yields `MotorPriceNotFound`.
    pub fn latest_motor_price(
        &self,
        motor_id: i64,
        on_date: NaiveDate,
    ) -> QuoteResult<&MotorPrice> {
        self.motor(motor_id)?;
        self.motor_prices
            .get(&motor_id)
            .into_iter()
            .flatten()
            .filter(|p| p.date_effective <= on_date)
            .max_by_key(|p| p.date_effective)
            .ok_or_else(|| QuoteError::MotorPriceNotFound {
                motor_id,
                quote_date: on_date.to_string(),
            })
    }

    /// All fans, ordered by id.
    pub fn fans_sorted(&self) -> Vec<&FanConfiguration> {
        let mut fans: Vec<_> = self.fans.values().collect();
        fans.sort_by_key(|f| f.id);
        fans
    }

    /// All components in display order.
    pub fn components_sorted(&self) -> Vec<&Component> {
        let mut components: Vec<_> = self.components.values().collect();
        components.sort_by_key(|c| (c.order_by, c.id));
        components
    }

    /// All motors, ordered by id.
    pub fn motors_sorted(&self) -> Vec<&Motor> {
        let mut motors: Vec<_> = self.motors.values().collect();
        motors.sort_by_key(|m| m.id);
        motors
    }

    pub fn fan_count(&self) -> usize {
        self.fans.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn motor_count(&self) -> usize {
        self.motors.len()
    }
}

/// Assemble the built-in catalog: four fans, twelve components, ten
/// motors with price history, and the measured override rows.
pub fn builtin_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    for fan in builtin_fan_range() {
        catalog.insert_fan(fan);
    }
    for (component, parameters) in builtin_component_catalog() {
        catalog.insert_component(component, parameters);
    }
    for row in builtin_fan_component_overrides() {
        catalog.insert_fan_component_override(row);
    }
    for motor in builtin_motors() {
        catalog.insert_motor(motor);
    }
    for price in builtin_motor_prices() {
        catalog.insert_motor_price(price);
    }

    catalog
}

/// Shared built-in catalog, assembled on first use.
pub static BUILTIN_CATALOG: Lazy<Catalog> = Lazy::new(builtin_catalog);
