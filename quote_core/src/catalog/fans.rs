// fans.rs - Fan configuration catalog for the quoting engine
//
// A fan configuration describes one fan size in the product range: its
// casing and hub diameters, the blade counts the rotor can be built with,
// the motor frame options, and which components may appear on a quote.
// Configurations are identified by a numeric id and by a human-readable
// uid such as "Ø762-Ø472" (fan diameter / hub diameter).

use serde::{Deserialize, Serialize};

/// One fan size in the product range.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "uid": "Ø762-Ø472",
///   "fan_size_mm": 762.0,
///   "hub_size_mm": 472.0,
///   "available_blade_qtys": [8, 10, 12],
///   "stator_blade_qty": 13,
///   "blade_name": "Yellow-Steel-As cast",
///   "mass_per_blade_kg": 3.4,
///   "available_motor_kw": [22, 30, 37, 45],
///   "motor_pole": 2,
///   "available_components": [3, 4, 11, 12],
///   "auto_selected_components": [4, 3]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FanConfiguration {
    /// Catalog identifier
    pub id: i64,
    /// Human-readable designation, e.g. "Ø762-Ø472"
    pub uid: String,
    /// Fan (casing bore) diameter in millimetres
    pub fan_size_mm: f64,
    /// Hub diameter in millimetres
    pub hub_size_mm: f64,
    /// Rotor blade counts this fan can be built with
    pub available_blade_qtys: Vec<u32>,
    /// Stator (guide vane) blade count
    pub stator_blade_qty: u32,
    /// Blade designation, e.g. "Yellow-Steel-As cast"
    pub blade_name: String,
    /// Mass of a single rotor blade in kilograms
    pub mass_per_blade_kg: f64,
    /// Motor ratings (kW) offered for this fan
    pub available_motor_kw: Vec<u32>,
    /// Motor pole count for this fan's duty
    pub motor_pole: u32,
    /// Component ids that may be quoted on this fan
    pub available_components: Vec<i64>,
    /// Component ids pre-selected when a quote is started
    pub auto_selected_components: Vec<i64>,
}

impl FanConfiguration {
    /// Check whether a blade count is offered for this fan.
    pub fn offers_blade_qty(&self, qty: u32) -> bool {
        self.available_blade_qtys.contains(&qty)
    }

    /// Check whether a component id may be quoted on this fan.
    pub fn offers_component(&self, component_id: i64) -> bool {
        self.available_components.contains(&component_id)
    }
}

/// Built-in fan range.
///
/// Four sizes spanning Ø762 to Ø1200. Component id lists reference the
/// built-in component catalog: every fan offers the full set, and the
/// structural set (Hub, Inlet Cone, Outlet Cone, Casing) is pre-selected.
pub fn builtin_fan_range() -> Vec<FanConfiguration> {
    // (id, uid, fan_mm, hub_mm, blade_qtys, stator, blade_name, kg/blade, motor_kw, poles)
    let seeds: [(
        i64,
        &str,
        f64,
        f64,
        &[u32],
        u32,
        &str,
        f64,
        &[u32],
        u32,
    ); 4] = [
        (
            1,
            "Ø762-Ø472",
            762.0,
            472.0,
            &[8, 10, 12],
            13,
            "Yellow-Steel-As cast",
            3.4,
            &[22, 30, 37, 45],
            2,
        ),
        (
            2,
            "Ø915-Ø625",
            915.0,
            625.0,
            &[8, 10, 12],
            13,
            "Yellow-Steel-As cast",
            5.1,
            &[45, 55, 75],
            2,
        ),
        (
            3,
            "Ø1016-Ø625",
            1016.0,
            625.0,
            &[6, 8, 10],
            11,
            "Green-Steel-As cast",
            4.8,
            &[45, 55, 75],
            2,
        ),
        (
            4,
            "Ø1200-Ø685",
            1200.0,
            685.0,
            &[6, 10, 14],
            15,
            "Orange-Ali-Trimmed",
            2.75,
            &[55, 75, 90, 110],
            4,
        ),
    ];

    // Component ids 1..=12 from the built-in component catalog.
    let all_components: Vec<i64> = (1..=12).collect();
    // Hub, Inlet Cone, Outlet Cone, Casing.
    let auto_selected: Vec<i64> = vec![4, 3, 11, 12];

    seeds
        .iter()
        .map(
            |&(id, uid, fan, hub, blades, stator, blade_name, mpb, motors, poles)| {
                FanConfiguration {
                    id,
                    uid: uid.to_string(),
                    fan_size_mm: fan,
                    hub_size_mm: hub,
                    available_blade_qtys: blades.to_vec(),
                    stator_blade_qty: stator,
                    blade_name: blade_name.to_string(),
                    mass_per_blade_kg: mpb,
                    available_motor_kw: motors.to_vec(),
                    motor_pole: poles,
                    available_components: all_components.clone(),
                    auto_selected_components: auto_selected.clone(),
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_fan_range() {
        let fans = builtin_fan_range();
        assert_eq!(fans.len(), 4);

        let f762 = &fans[0];
        assert_eq!(f762.uid, "Ø762-Ø472");
        assert_eq!(f762.fan_size_mm, 762.0);
        assert_eq!(f762.hub_size_mm, 472.0);
        assert!(f762.offers_blade_qty(10));
        assert!(!f762.offers_blade_qty(14));

        // Every fan offers the full component set and pre-selects the
        // structural four.
        for fan in &fans {
            assert_eq!(fan.available_components.len(), 12);
            assert_eq!(fan.auto_selected_components, vec![4, 3, 11, 12]);
            for id in &fan.auto_selected_components {
                assert!(fan.offers_component(*id));
            }
        }
    }

    #[test]
    fn test_offers_component() {
        let fans = builtin_fan_range();
        assert!(fans[0].offers_component(4));
        assert!(!fans[0].offers_component(99));
    }

    #[test]
    fn test_fan_configuration_serde() {
        let fans = builtin_fan_range();
        let json = serde_json::to_string(&fans[0]).unwrap();
        let back: FanConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fans[0]);
        assert!(json.contains("\"uid\":\"Ø762-Ø472\""));
    }
}
