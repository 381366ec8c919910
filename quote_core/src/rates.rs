//! Rates and Global Settings
//!
//! Material costs, labour rates, and plant-wide settings, consolidated into
//! the flat [`RateTable`] the calculators read. The table is passed
//! explicitly into every calculation call; nothing in the engine reads
//! ambient state, so a test can pin the whole cost basis with one struct.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::rates::{builtin_rate_table, RateTable};
//!
//! let rates: RateTable = builtin_rate_table();
//! // 285/hr over an 8 hour day at 350 kg/day
//! assert!((rates.labour_cost_per_kg() - 6.5143).abs() < 0.001);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, QuoteResult};

/// A purchasable material or bought-in line used by the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name, unique (e.g., "Steel S355JR")
    pub name: String,

    /// Cost per `cost_unit`
    pub cost_per_unit: f64,

    /// Costing unit: "kg" for mass-priced stock, "item" for piece prices
    pub cost_unit: String,
}

impl Material {
    pub fn new(name: impl Into<String>, cost_per_unit: f64, cost_unit: impl Into<String>) -> Self {
        Material {
            name: name.into(),
            cost_per_unit,
            cost_unit: cost_unit.into(),
        }
    }

    /// Flat lookup key: lowercased name with separators folded to
    /// underscores, suffixed with the cost unit (e.g.
    /// `steel_s355jr_cost_per_kg`).
    pub fn normalized_key(&self) -> String {
        let name = self
            .name
            .to_lowercase()
            .replace(' ', "_")
            .replace('-', "_")
            .replace('/', "_");
        format!("{}_cost_per_{}", name, self.cost_unit)
    }
}

/// A labour rate row: hourly rate plus shop throughput.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabourRate {
    /// Rate name (e.g., "Fabrication")
    pub rate_name: String,

    /// Charged rate per hour
    pub rate_per_hour: f64,

    /// Shop throughput in kilograms of fabricated mass per working day
    pub productivity_kg_per_day: Option<f64>,
}

impl LabourRate {
    pub fn new(
        rate_name: impl Into<String>,
        rate_per_hour: f64,
        productivity_kg_per_day: Option<f64>,
    ) -> Self {
        LabourRate {
            rate_name: rate_name.into(),
            rate_per_hour,
            productivity_kg_per_day,
        }
    }

    fn normalized_name(&self) -> String {
        self.rate_name
            .to_lowercase()
            .replace(' ', "_")
            .replace('-', "_")
            .replace('/', "_")
    }
}

/// Plant-wide settings that feed the calculation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Steel density in kg/m3
    pub steel_density_kg_m3: f64,

    /// Working hours per day, used to convert hourly labour to per-kg cost
    pub working_hours_per_day: f64,

    /// Default markup fraction applied once to the quote cost base
    /// (0.25 means 25%)
    pub default_markup: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            steel_density_kg_m3: 7850.0,
            working_hours_per_day: 8.0,
            default_markup: 0.25,
        }
    }
}

/// The consolidated, flat cost basis handed to calculators.
///
/// Built from [`Material`], [`LabourRate`], and [`GlobalSettings`] rows via
/// [`RateTable::consolidate`], or constructed directly in tests. Quote
/// results can serialize the table alongside the totals as an audit trail
/// of the rates a price was built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Steel density in kg/m3
    pub steel_density_kg_m3: f64,

    /// Structural plate: S355JR cost per kg
    pub steel_cost_per_kg: f64,

    /// Machined EN8 shaft/hub work cost per kg
    pub en8_machining_cost_per_kg: f64,

    /// Taperlock bush piece price
    pub taperlock_bush_cost_per_item: f64,

    /// Self closing door hardware set piece price
    pub scd_items_cost_per_item: f64,

    /// Aluminium blade cost per kg
    pub ali_blades_cost_per_kg: f64,

    /// Fabrication labour rate per hour
    pub labour_rate_per_hour: f64,

    /// Fabrication throughput in kg per working day
    pub labour_productivity_kg_per_day: f64,

    /// Working hours per day
    pub working_hours_per_day: f64,

    /// Default markup fraction (0.25 means 25%)
    pub default_markup: f64,
}

impl RateTable {
    /// Consolidate master rows into the flat table.
    ///
    /// Material rows are matched by their normalized key, labour by rate
    /// name; a missing row fails with `RateNotFound` naming the key, since
    /// every field here is load-bearing for some calculator.
    pub fn consolidate(
        materials: &[Material],
        labour_rates: &[LabourRate],
        settings: &GlobalSettings,
    ) -> QuoteResult<Self> {
        let material_cost = |key: &str| -> QuoteResult<f64> {
            materials
                .iter()
                .find(|m| m.normalized_key() == key)
                .map(|m| m.cost_per_unit)
                .ok_or_else(|| QuoteError::rate_not_found(key))
        };

        let fabrication = labour_rates
            .iter()
            .find(|r| r.normalized_name() == "fabrication")
            .ok_or_else(|| QuoteError::rate_not_found("fabrication"))?;

        let productivity = fabrication
            .productivity_kg_per_day
            .ok_or_else(|| QuoteError::rate_not_found("fabrication productivity_kg_per_day"))?;
        if productivity <= 0.0 {
            return Err(QuoteError::invalid_calculation_input(
                "productivity_kg_per_day",
                productivity.to_string(),
                "Productivity must be positive to derive a per-kg labour rate",
            ));
        }

        Ok(RateTable {
            steel_density_kg_m3: settings.steel_density_kg_m3,
            steel_cost_per_kg: material_cost("steel_s355jr_cost_per_kg")?,
            en8_machining_cost_per_kg: material_cost("en8_machining_cost_per_kg")?,
            taperlock_bush_cost_per_item: material_cost("taperlock_bush_cost_per_item")?,
            scd_items_cost_per_item: material_cost("scd_items_cost_per_item")?,
            ali_blades_cost_per_kg: material_cost("ali_blades_cost_per_kg")?,
            labour_rate_per_hour: fabrication.rate_per_hour,
            labour_productivity_kg_per_day: productivity,
            working_hours_per_day: settings.working_hours_per_day,
            default_markup: settings.default_markup,
        })
    }

    /// Labour cost per kilogram of fabricated mass:
    /// (rate/hour x hours/day) / (kg/day).
    pub fn labour_cost_per_kg(&self) -> f64 {
        self.labour_rate_per_hour * self.working_hours_per_day
            / self.labour_productivity_kg_per_day
    }
}

/// Builtin material cost rows matching the plant's current rate sheet.
pub fn builtin_materials() -> Vec<Material> {
    vec![
        Material::new("Steel S355JR", 25.40, "kg"),
        Material::new("EN8 Machining", 85.00, "kg"),
        Material::new("Taperlock Bush", 420.00, "item"),
        Material::new("SCD Items", 1850.00, "item"),
        Material::new("Ali Blades", 310.00, "kg"),
    ]
}

/// Builtin labour rate rows.
pub fn builtin_labour_rates() -> Vec<LabourRate> {
    vec![LabourRate::new("Fabrication", 285.00, Some(350.0))]
}

/// The builtin consolidated rate table.
///
/// Field-for-field equal to consolidating [`builtin_materials`] and
/// [`builtin_labour_rates`] under default settings; kept literal so the
/// builtin path has no failure mode.
pub fn builtin_rate_table() -> RateTable {
    RateTable {
        steel_density_kg_m3: 7850.0,
        steel_cost_per_kg: 25.40,
        en8_machining_cost_per_kg: 85.00,
        taperlock_bush_cost_per_item: 420.00,
        scd_items_cost_per_item: 1850.00,
        ali_blades_cost_per_kg: 310.00,
        labour_rate_per_hour: 285.00,
        labour_productivity_kg_per_day: 350.0,
        working_hours_per_day: 8.0,
        default_markup: 0.25,
    }
}

/// Shared builtin rate table for read-only use.
pub static BUILTIN_RATES: Lazy<RateTable> = Lazy::new(builtin_rate_table);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_keys() {
        let steel = Material::new("Steel S355JR", 25.40, "kg");
        assert_eq!(steel.normalized_key(), "steel_s355jr_cost_per_kg");

        let bush = Material::new("Taperlock Bush", 420.0, "item");
        assert_eq!(bush.normalized_key(), "taperlock_bush_cost_per_item");
    }

    #[test]
    fn test_consolidate_matches_builtin_table() {
        let table = RateTable::consolidate(
            &builtin_materials(),
            &builtin_labour_rates(),
            &GlobalSettings::default(),
        )
        .unwrap();
        assert_eq!(table, builtin_rate_table());
    }

    #[test]
    fn test_labour_cost_per_kg() {
        let table = builtin_rate_table();
        // 285 * 8 / 350 = 6.514285...
        assert!((table.labour_cost_per_kg() - 6.514285714).abs() < 1e-6);
    }

    #[test]
    fn test_missing_material_is_named() {
        let materials = vec![Material::new("Steel S355JR", 25.40, "kg")];
        let err = RateTable::consolidate(
            &materials,
            &builtin_labour_rates(),
            &GlobalSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "RATE_NOT_FOUND");
        assert!(err.to_string().contains("en8_machining_cost_per_kg"));
    }

    #[test]
    fn test_missing_fabrication_rate() {
        let err = RateTable::consolidate(
            &builtin_materials(),
            &[LabourRate::new("Painting", 120.0, None)],
            &GlobalSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "RATE_NOT_FOUND");
    }

    #[test]
    fn test_zero_productivity_rejected() {
        let err = RateTable::consolidate(
            &builtin_materials(),
            &[LabourRate::new("Fabrication", 285.0, Some(0.0))],
            &GlobalSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CALCULATION_INPUT");
    }

    #[test]
    fn test_settings_defaults() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.steel_density_kg_m3, 7850.0);
        assert_eq!(settings.working_hours_per_day, 8.0);
        assert_eq!(settings.default_markup, 0.25);
    }

    #[test]
    fn test_rate_table_serialization() {
        let table = builtin_rate_table();
        let json = serde_json::to_string_pretty(&table).unwrap();
        assert!(json.contains("steel_cost_per_kg"));

        let roundtrip: RateTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, roundtrip);
    }

    #[test]
    fn test_builtin_static() {
        assert_eq!(*BUILTIN_RATES, builtin_rate_table());
        assert_eq!(BUILTIN_RATES.default_markup, 0.25);
    }
}
