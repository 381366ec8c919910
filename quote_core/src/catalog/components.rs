// components.rs - Component catalog and formula parameter bindings
//
// A component is one buildable part of a fan assembly (Hub, Inlet Cone,
// Casing, ...). Each component carries exactly one ComponentParameters row
// binding it to a mass formula, a cost formula, and optional geometry
// formulas plus fabrication defaults. A FanComponentParameters row pins a
// measured value (length, stiffening factor) for one fan/component pair
// and takes precedence over the formula-derived value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{QuoteError, QuoteResult};

/// One buildable part of a fan assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Component {
    /// Catalog identifier
    pub id: i64,
    /// Display name, unique, e.g. "Inlet Cone"
    pub name: String,
    /// Stable machine code, unique, e.g. "INLET_CONE"
    pub code: String,
    /// Display ordering on quote forms (ascending)
    pub order_by: i32,
}

/// Formula bindings and fabrication defaults for one component.
///
/// `mass_formula_type` and `cost_formula_type` are mandatory; the geometry
/// formula fields are optional and fall back to hub-diameter geometry or a
/// per-fan override when absent. Formula codes are matched case-sensitively
/// against the closed formula sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentParameters {
    /// Component this row configures
    pub component_id: i64,
    /// Mass calculator code, e.g. "CYLINDER_SURFACE"
    pub mass_formula_type: String,
    /// Costing rule code, e.g. "STEEL_PLUS_LABOUR"
    pub cost_formula_type: String,
    /// Diameter formula code; None means diameters default to the hub size
    pub diameter_formula_type: Option<String>,
    /// Length formula code; None means length comes from a per-fan override
    pub length_formula_type: Option<String>,
    /// Stiffening formula code; None means no stiffening allowance
    pub stiffening_formula_type: Option<String>,
    /// Default plate thickness in millimetres
    pub default_thickness_mm: f64,
    /// Default fabrication waste as a fraction (0.15 = 15% offcut)
    pub default_fabrication_waste_factor: f64,
    /// Multiplier for the LENGTH_D_X_MULTIPLIER formula
    pub length_multiplier: Option<f64>,
}

/// Measured override values for one fan/component pair.
///
/// At most one row exists per pair. A `Some` field here wins over the
/// corresponding formula-derived value during parameter resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FanComponentParameters {
    pub fan_configuration_id: i64,
    pub component_id: i64,
    /// Measured axial length in millimetres
    pub length_mm: Option<f64>,
    /// Measured stiffening factor (multiplicative, 1.0 = none)
    pub stiffening_factor: Option<f64>,
}

/// Built-in component catalog.
///
/// Twelve components covering the standard axial fan build, each paired
/// with its formula bindings. Codes and formula assignments mirror the
/// estimating workbook this engine replaced.
pub fn builtin_component_catalog() -> Vec<(Component, ComponentParameters)> {
    // (id, name, code, order, mass, cost, diameter_f, length_f, stiffening_f,
    //  thickness_mm, waste, length_multiplier)
    let seeds: [(
        i64,
        &str,
        &str,
        i32,
        &str,
        &str,
        Option<&str>,
        Option<&str>,
        Option<&str>,
        f64,
        f64,
        Option<f64>,
    ); 12] = [
        (
            1,
            "Screen Inlet Outside",
            "SCREEN_INLET_OUT",
            10,
            "CYLINDER_SURFACE",
            "STEEL_PLUS_LABOUR",
            Some("HUB_DIAMETER_X_1_35"),
            Some("LENGTH_D_X_MULTIPLIER"),
            None,
            3.0,
            0.10,
            Some(0.10),
        ),
        (
            2,
            "Screen Inlet Inside",
            "SCREEN_INLET_IN",
            20,
            "CYLINDER_SURFACE",
            "STEEL_PLUS_LABOUR",
            None,
            Some("LENGTH_D_X_MULTIPLIER"),
            None,
            3.0,
            0.10,
            Some(0.10),
        ),
        (
            3,
            "Inlet Cone",
            "INLET_CONE",
            30,
            "CONE_SURFACE",
            "STEEL_PLUS_LABOUR",
            Some("HUB_DIAMETER_X_1_35"),
            Some("CONICAL_15_DEG"),
            None,
            3.0,
            0.15,
            None,
        ),
        (
            4,
            "Hub",
            "HUB",
            40,
            "CYLINDER_SURFACE",
            "STEEL_PLUS_LABOUR",
            None,
            None,
            None,
            10.0,
            0.10,
            None,
        ),
        (
            5,
            "Silencer 1D",
            "SILENCER_1D",
            50,
            "CYLINDER_SURFACE",
            "STEEL_PLUS_LABOUR",
            Some("HUB_PLUS_CONSTANT"),
            Some("LENGTH_D_X_MULTIPLIER"),
            None,
            2.0,
            0.12,
            Some(1.0),
        ),
        (
            6,
            "Inlet-Track",
            "INLET_TRACK",
            60,
            "CYLINDER_SURFACE",
            "STEEL_PLUS_LABOUR",
            None,
            Some("LENGTH_D_X_MULTIPLIER"),
            None,
            4.0,
            0.10,
            Some(0.25),
        ),
        (
            7,
            "Rotor",
            "ROTOR",
            70,
            "ROTOR_EMPIRICAL",
            "ROTOR_EMPIRICAL_COST",
            None,
            None,
            None,
            0.0,
            0.0,
            None,
        ),
        (
            8,
            "Motor Barrel",
            "MOTOR_BARREL",
            80,
            "CYLINDER_SURFACE",
            "STEEL_PLUS_LABOUR",
            None,
            Some("LENGTH_D_X_MULTIPLIER"),
            None,
            5.0,
            0.10,
            Some(0.45),
        ),
        (
            9,
            "Self Closing Door",
            "SCD",
            90,
            "SCD_MASS",
            "STEEL_PLUS_LABOUR",
            None,
            None,
            Some("LINEAR_HUB_SCALING_A"),
            2.0,
            0.10,
            None,
        ),
        (
            10,
            "Diffuser",
            "DIFFUSER",
            100,
            "CONE_SURFACE",
            "STEEL_PLUS_LABOUR",
            Some("HUB_DIAMETER_X_1_25"),
            Some("CONICAL_3_5_DEG"),
            None,
            3.0,
            0.15,
            None,
        ),
        (
            11,
            "Outlet Cone",
            "OUTLET_CONE",
            110,
            "CONE_SURFACE",
            "STEEL_PLUS_LABOUR",
            Some("CONICAL_60_DEG"),
            Some("CONICAL_3_5_DEG"),
            None,
            3.0,
            0.15,
            None,
        ),
        (
            12,
            "Casing",
            "CASING",
            120,
            "CYLINDER_SURFACE",
            "STEEL_PLUS_LABOUR",
            Some("HUB_PLUS_CONSTANT"),
            Some("LENGTH_D_X_MULTIPLIER"),
            None,
            6.0,
            0.10,
            Some(0.60),
        ),
    ];

    seeds
        .iter()
        .map(
            |&(id, name, code, order, mass, cost, dia, len, stiff, t, waste, mult)| {
                (
                    Component {
                        id,
                        name: name.to_string(),
                        code: code.to_string(),
                        order_by: order,
                    },
                    ComponentParameters {
                        component_id: id,
                        mass_formula_type: mass.to_string(),
                        cost_formula_type: cost.to_string(),
                        diameter_formula_type: dia.map(|s| s.to_string()),
                        length_formula_type: len.map(|s| s.to_string()),
                        stiffening_formula_type: stiff.map(|s| s.to_string()),
                        default_thickness_mm: t,
                        default_fabrication_waste_factor: waste,
                        length_multiplier: mult,
                    },
                )
            },
        )
        .collect()
}

/// Built-in per-fan override rows.
///
/// Hub and Self Closing Door lengths are measured per fan size rather than
/// formula-derived. The Ø1200 casing additionally carries a stiffening
/// factor for its heavier ring set.
pub fn builtin_fan_component_overrides() -> Vec<FanComponentParameters> {
    // (fan_id, component_id, length_mm, stiffening_factor)
    let seeds: [(i64, i64, Option<f64>, Option<f64>); 9] = [
        // Hub lengths
        (1, 4, Some(320.0), None),
        (2, 4, Some(385.0), None),
        (3, 4, Some(430.0), None),
        (4, 4, Some(505.0), None),
        // Self Closing Door lengths
        (1, 9, Some(180.0), None),
        (2, 9, Some(220.0), None),
        (3, 9, Some(220.0), None),
        (4, 9, Some(260.0), None),
        // Ø1200 casing stiffening rings
        (4, 12, None, Some(1.12)),
    ];

    seeds
        .iter()
        .map(|&(fan_id, component_id, length_mm, stiffening_factor)| {
            FanComponentParameters {
                fan_configuration_id: fan_id,
                component_id,
                length_mm,
                stiffening_factor,
            }
        })
        .collect()
}

/// Load component definitions and their parameter rows from a CSV file.
///
/// Expected header columns (case-insensitive): `id`, `name`, `code`,
/// `order_by`, `mass_formula_type`, `cost_formula_type`,
/// `diameter_formula_type`, `length_formula_type`,
/// `stiffening_formula_type`, `default_thickness_mm`,
/// `default_fabrication_waste_factor`, `length_multiplier`.
/// Empty cells in optional columns become `None`; malformed numerics are
/// reported with their line number.
pub fn load_components_from_csv(path: &str) -> QuoteResult<Vec<(Component, ComponentParameters)>> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    let file = File::open(path).map_err(|e| {
        QuoteError::file_error("open", path, format!("Failed to open CSV: {}", e))
    })?;

    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| QuoteError::file_error("read", path, "CSV file is empty"))?
        .map_err(|e| {
            QuoteError::file_error("read", path, format!("Failed to read header: {}", e))
        })?;

    let headers: Vec<&str> = header_line.split(',').collect();
    let col_index = |name: &str| -> Option<usize> {
        headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    // Required columns
    let id_idx = col_index("id")
        .ok_or_else(|| QuoteError::file_error("parse", path, "Missing 'id' column"))?;
    let name_idx = col_index("name")
        .ok_or_else(|| QuoteError::file_error("parse", path, "Missing 'name' column"))?;
    let code_idx = col_index("code")
        .ok_or_else(|| QuoteError::file_error("parse", path, "Missing 'code' column"))?;
    let mass_idx = col_index("mass_formula_type").ok_or_else(|| {
        QuoteError::file_error("parse", path, "Missing 'mass_formula_type' column")
    })?;
    let cost_idx = col_index("cost_formula_type").ok_or_else(|| {
        QuoteError::file_error("parse", path, "Missing 'cost_formula_type' column")
    })?;

    // Optional columns
    let order_idx = col_index("order_by");
    let dia_idx = col_index("diameter_formula_type");
    let len_idx = col_index("length_formula_type");
    let stiff_idx = col_index("stiffening_formula_type");
    let thickness_idx = col_index("default_thickness_mm");
    let waste_idx = col_index("default_fabrication_waste_factor");
    let mult_idx = col_index("length_multiplier");

    let mut rows = Vec::new();
    let mut line_num = 1;

    for line_result in lines {
        line_num += 1;
        let line = line_result.map_err(|e| {
            QuoteError::file_error(
                "read",
                path,
                format!("Failed to read line {}: {}", line_num, e),
            )
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        let get_opt_str = |idx: Option<usize>| -> Option<String> {
            idx.map(|i| cell(&fields, i))
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        let id: i64 = cell(&fields, id_idx).parse().map_err(|_| {
            QuoteError::csv_parse(line_num, format!("invalid id '{}'", cell(&fields, id_idx)))
        })?;

        let name = cell(&fields, name_idx).to_string();
        let code = cell(&fields, code_idx).to_string();
        if name.is_empty() || code.is_empty() {
            return Err(QuoteError::csv_parse(
                line_num,
                "name and code must not be empty",
            ));
        }

        let order_by: i32 = match order_idx.map(|i| cell(&fields, i)).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| {
                QuoteError::csv_parse(line_num, format!("invalid order_by '{}'", raw))
            })?,
            None => 0,
        };

        let parse_f64_field = |idx: Option<usize>, column: &str| -> QuoteResult<Option<f64>> {
            match idx.map(|i| cell(&fields, i)).filter(|s| !s.is_empty()) {
                Some(raw) => match parse_optional_f64(raw) {
                    Some(v) => Ok(Some(v)),
                    // Dashes mean "not applicable", anything else is a bad cell.
                    None if raw == "-" || raw == "—" => Ok(None),
                    None => Err(QuoteError::csv_parse(
                        line_num,
                        format!("invalid {} '{}'", column, raw),
                    )),
                },
                None => Ok(None),
            }
        };

        let default_thickness_mm =
            parse_f64_field(thickness_idx, "default_thickness_mm")?.unwrap_or(0.0);
        let default_fabrication_waste_factor =
            parse_f64_field(waste_idx, "default_fabrication_waste_factor")?.unwrap_or(0.0);
        let length_multiplier = parse_f64_field(mult_idx, "length_multiplier")?;

        rows.push((
            Component {
                id,
                name,
                code,
                order_by,
            },
            ComponentParameters {
                component_id: id,
                mass_formula_type: cell(&fields, mass_idx).to_string(),
                cost_formula_type: cell(&fields, cost_idx).to_string(),
                diameter_formula_type: get_opt_str(dia_idx),
                length_formula_type: get_opt_str(len_idx),
                stiffening_formula_type: get_opt_str(stiff_idx),
                default_thickness_mm,
                default_fabrication_waste_factor,
                length_multiplier,
            },
        ));
    }

    Ok(rows)
}

pub(crate) fn cell<'a>(fields: &[&'a str], idx: usize) -> &'a str {
    fields.get(idx).copied().unwrap_or("").trim()
}

/// Parse a CSV cell into an f64, treating empty and dash cells as missing.
pub(crate) fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    f64::from_str(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as IoWrite;

    #[test]
    fn test_builtin_catalog_integrity() {
        let catalog = builtin_component_catalog();
        assert_eq!(catalog.len(), 12);

        for (component, params) in &catalog {
            assert_eq!(component.id, params.component_id);
            assert!(!component.name.is_empty());
            assert!(!component.code.is_empty());
            assert!(!params.mass_formula_type.is_empty());
            assert!(!params.cost_formula_type.is_empty());
        }

        // Codes and names are unique.
        for (i, (a, _)) in catalog.iter().enumerate() {
            for (b, _) in catalog.iter().skip(i + 1) {
                assert_ne!(a.code, b.code);
                assert_ne!(a.name, b.name);
            }
        }

        // Display order is strictly ascending as seeded.
        for pair in catalog.windows(2) {
            assert!(pair[0].0.order_by < pair[1].0.order_by);
        }
    }

    #[test]
    fn test_builtin_rotor_binding() {
        let catalog = builtin_component_catalog();
        let (rotor, params) = catalog
            .iter()
            .find(|(c, _)| c.code == "ROTOR")
            .expect("rotor in builtin catalog");
        assert_eq!(rotor.name, "Rotor");
        assert_eq!(params.mass_formula_type, "ROTOR_EMPIRICAL");
        assert_eq!(params.cost_formula_type, "ROTOR_EMPIRICAL_COST");
        assert!(params.diameter_formula_type.is_none());
        assert!(params.length_formula_type.is_none());
    }

    #[test]
    fn test_builtin_overrides() {
        let overrides = builtin_fan_component_overrides();

        // Every fan gets a hub length and an SCD length.
        for fan_id in 1..=4 {
            assert!(overrides
                .iter()
                .any(|o| o.fan_configuration_id == fan_id
                    && o.component_id == 4
                    && o.length_mm.is_some()));
            assert!(overrides
                .iter()
                .any(|o| o.fan_configuration_id == fan_id
                    && o.component_id == 9
                    && o.length_mm.is_some()));
        }

        let casing_stiffening = overrides
            .iter()
            .find(|o| o.fan_configuration_id == 4 && o.component_id == 12)
            .expect("fan 4 casing override");
        assert_eq!(casing_stiffening.stiffening_factor, Some(1.12));
        assert!(casing_stiffening.length_mm.is_none());
    }

    #[test]
    fn test_load_components_from_csv() {
        let path = std::env::temp_dir().join("quote_core_components_ok.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "id,name,code,order_by,mass_formula_type,cost_formula_type,\
             diameter_formula_type,length_formula_type,stiffening_formula_type,\
             default_thickness_mm,default_fabrication_waste_factor,length_multiplier"
        )
        .unwrap();
        writeln!(
            file,
            "3,Inlet Cone,INLET_CONE,30,CONE_SURFACE,STEEL_PLUS_LABOUR,\
             HUB_DIAMETER_X_1_35,CONICAL_15_DEG,,3.0,0.15,"
        )
        .unwrap();
        writeln!(
            file,
            "7,Rotor,ROTOR,70,ROTOR_EMPIRICAL,ROTOR_EMPIRICAL_COST,,,,0,0,"
        )
        .unwrap();
        drop(file);

        let rows = load_components_from_csv(path.to_str().unwrap()).unwrap();
        assert_eq!(rows.len(), 2);

        let (cone, cone_params) = &rows[0];
        assert_eq!(cone.id, 3);
        assert_eq!(cone.code, "INLET_CONE");
        assert_eq!(cone_params.mass_formula_type, "CONE_SURFACE");
        assert_eq!(
            cone_params.diameter_formula_type.as_deref(),
            Some("HUB_DIAMETER_X_1_35")
        );
        assert!(cone_params.stiffening_formula_type.is_none());
        assert_eq!(cone_params.default_thickness_mm, 3.0);
        assert_eq!(cone_params.default_fabrication_waste_factor, 0.15);
        assert!(cone_params.length_multiplier.is_none());

        let (_, rotor_params) = &rows[1];
        assert_eq!(rotor_params.cost_formula_type, "ROTOR_EMPIRICAL_COST");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_components_from_csv_bad_numeric() {
        let path = std::env::temp_dir().join("quote_core_components_bad.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "id,name,code,mass_formula_type,cost_formula_type,default_thickness_mm"
        )
        .unwrap();
        writeln!(file, "4,Hub,HUB,CYLINDER_SURFACE,STEEL_PLUS_LABOUR,10.0").unwrap();
        writeln!(
            file,
            "12,Casing,CASING,CYLINDER_SURFACE,STEEL_PLUS_LABOUR,six"
        )
        .unwrap();
        drop(file);

        let err = load_components_from_csv(path.to_str().unwrap()).unwrap_err();
        match err {
            QuoteError::CsvParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("default_thickness_mm"));
                assert!(message.contains("six"));
            }
            other => panic!("expected CsvParse, got {:?}", other),
        }

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_component_parameters_serde() {
        let (_, params) = &builtin_component_catalog()[2];
        let json = serde_json::to_string(params).unwrap();
        let back: ComponentParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, params);
    }
}
