// motors.rs - Motor catalog and dated price history
//
// Motors are bought-in items quoted at supplier list price. Each motor
// carries a price history: one row per effective date, with separate
// prices for foot and flange mounting. Quotes pick the latest row on or
// before the quote date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{QuoteError, QuoteResult};

use super::components::{cell, parse_optional_f64};

/// How the motor is mounted to the fan casing.
///
/// Mounting changes the supplier price, not the fan build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    Foot,
    Flange,
}

impl MountType {
    pub const ALL: [MountType; 2] = [MountType::Foot, MountType::Flange];

    pub fn code(&self) -> &'static str {
        match self {
            MountType::Foot => "foot",
            MountType::Flange => "flange",
        }
    }

    /// Parse a mount type code, case-insensitively.
    pub fn from_code(code: &str) -> QuoteResult<Self> {
        match code.to_lowercase().as_str() {
            "foot" => Ok(MountType::Foot),
            "flange" => Ok(MountType::Flange),
            _ => Err(QuoteError::invalid_quote_request(format!(
                "Unknown mount type '{}', expected 'foot' or 'flange'",
                code
            ))),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MountType::Foot => "Foot mounted",
            MountType::Flange => "Flange mounted",
        }
    }
}

impl fmt::Display for MountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One motor in the supplier catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Motor {
    /// Catalog identifier
    pub id: i64,
    /// Supplier name, e.g. "WEG"
    pub supplier: String,
    /// Rated output in kilowatts
    pub rated_output_kw: f64,
    /// Pole count (2 = ~2950 rpm, 4 = ~1475 rpm)
    pub poles: u32,
    /// IEC frame size, e.g. "225S/M"
    pub frame_size: String,
}

impl Motor {
    /// Short designation for display, e.g. "WEG 45kW 2P".
    pub fn designation(&self) -> String {
        format!("{} {}kW {}P", self.supplier, self.rated_output_kw, self.poles)
    }
}

/// One dated price row for a motor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MotorPrice {
    pub motor_id: i64,
    /// Date this price takes effect
    pub date_effective: NaiveDate,
    pub foot_price: f64,
    pub flange_price: f64,
}

impl MotorPrice {
    pub fn price_for(&self, mount: MountType) -> f64 {
        match mount {
            MountType::Foot => self.foot_price,
            MountType::Flange => self.flange_price,
        }
    }
}

/// Built-in motor catalog.
///
/// Every rated output and pole count pairing offered by a built-in fan
/// has a matching motor here.
pub fn builtin_motors() -> Vec<Motor> {
    // (id, supplier, kW, poles, frame)
    let seeds: [(i64, &str, f64, u32, &str); 10] = [
        (1, "WEG", 22.0, 2, "180M"),
        (2, "WEG", 30.0, 2, "200L"),
        (3, "WEG", 37.0, 2, "225S/M"),
        (4, "WEG", 45.0, 2, "225S/M"),
        (5, "ABB", 55.0, 2, "250S/M"),
        (6, "ABB", 75.0, 2, "280S/M"),
        (7, "ABB", 90.0, 4, "280S/M"),
        (8, "ABB", 110.0, 4, "315S/M"),
        (9, "ABB", 55.0, 4, "250S/M"),
        (10, "ABB", 75.0, 4, "280S/M"),
    ];

    seeds
        .iter()
        .map(|&(id, supplier, kw, poles, frame)| Motor {
            id,
            supplier: supplier.to_string(),
            rated_output_kw: kw,
            poles,
            frame_size: frame.to_string(),
        })
        .collect()
}

/// Built-in price history.
///
/// One row per motor from the September 2024 list. Motor 4 additionally
/// carries the March 2025 list increase, so quotes dated between the two
/// pick the September row.
pub fn builtin_motor_prices() -> Vec<MotorPrice> {
    // (motor_id, year, month, day, foot, flange)
    let seeds: [(i64, i32, u32, u32, f64, f64); 11] = [
        (1, 2024, 9, 1, 18450.0, 19920.0),
        (2, 2024, 9, 1, 23780.0, 25690.0),
        (3, 2024, 9, 1, 28400.0, 30670.0),
        (4, 2024, 9, 1, 33950.0, 36670.0),
        (4, 2025, 3, 1, 35650.0, 38500.0),
        (5, 2024, 9, 1, 41200.0, 44500.0),
        (6, 2024, 9, 1, 52300.0, 56480.0),
        (7, 2024, 9, 1, 61750.0, 66690.0),
        (8, 2024, 9, 1, 74800.0, 80780.0),
        (9, 2024, 9, 1, 43650.0, 47140.0),
        (10, 2024, 9, 1, 55400.0, 59830.0),
    ];

    seeds
        .iter()
        .filter_map(|&(motor_id, y, m, d, foot, flange)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date_effective| MotorPrice {
                motor_id,
                date_effective,
                foot_price: foot,
                flange_price: flange,
            })
        })
        .collect()
}

/// Load motor price rows from a CSV file.
///
/// Expected header columns (case-insensitive): `motor_id`,
/// `date_effective` (ISO 8601, e.g. 2024-09-01), `foot_price`,
/// `flange_price`.
pub fn load_motor_prices_from_csv(path: &str) -> QuoteResult<Vec<MotorPrice>> {
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

    let motor_idx = col_index("motor_id")
        .ok_or_else(|| QuoteError::file_error("parse", path, "Missing 'motor_id' column"))?;
    let date_idx = col_index("date_effective")
        .ok_or_else(|| QuoteError::file_error("parse", path, "Missing 'date_effective' column"))?;
    let foot_idx = col_index("foot_price")
        .ok_or_else(|| QuoteError::file_error("parse", path, "Missing 'foot_price' column"))?;
    let flange_idx = col_index("flange_price")
        .ok_or_else(|| QuoteError::file_error("parse", path, "Missing 'flange_price' column"))?;

    let mut prices = Vec::new();
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

        let motor_id: i64 = cell(&fields, motor_idx).parse().map_err(|_| {
            QuoteError::csv_parse(
                line_num,
                format!("invalid motor_id '{}'", cell(&fields, motor_idx)),
            )
        })?;

        let date_effective = NaiveDate::parse_from_str(cell(&fields, date_idx), "%Y-%m-%d")
            .map_err(|_| {
                QuoteError::csv_parse(
                    line_num,
                    format!("invalid date_effective '{}'", cell(&fields, date_idx)),
                )
            })?;

        let foot_price = parse_optional_f64(cell(&fields, foot_idx)).ok_or_else(|| {
            QuoteError::csv_parse(
                line_num,
                format!("invalid foot_price '{}'", cell(&fields, foot_idx)),
            )
        })?;

        let flange_price = parse_optional_f64(cell(&fields, flange_idx)).ok_or_else(|| {
            QuoteError::csv_parse(
                line_num,
                format!("invalid flange_price '{}'", cell(&fields, flange_idx)),
            )
        })?;

        prices.push(MotorPrice {
            motor_id,
            date_effective,
            foot_price,
            flange_price,
        });
    }

    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as IoWrite;

    #[test]
    fn test_mount_type_codes() {
        for mount in MountType::ALL {
            assert_eq!(MountType::from_code(mount.code()).unwrap(), mount);
        }
        assert_eq!(MountType::from_code("FLANGE").unwrap(), MountType::Flange);

        let err = MountType::from_code("pad").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUOTE_REQUEST");
        assert!(err.to_string().contains("pad"));
    }

    #[test]
    fn test_mount_type_serde() {
        let json = serde_json::to_string(&MountType::Foot).unwrap();
        assert_eq!(json, "\"foot\"");
        let back: MountType = serde_json::from_str("\"flange\"").unwrap();
        assert_eq!(back, MountType::Flange);
    }

    #[test]
    fn test_builtin_motors_have_prices() {
        let motors = builtin_motors();
        let prices = builtin_motor_prices();
        assert_eq!(motors.len(), 10);

        for motor in &motors {
            assert!(
                prices.iter().any(|p| p.motor_id == motor.id),
                "motor {} has no price row",
                motor.id
            );
        }

        // Motor 4 carries two dated rows.
        let motor_4_rows: Vec<_> = prices.iter().filter(|p| p.motor_id == 4).collect();
        assert_eq!(motor_4_rows.len(), 2);
        assert!(motor_4_rows[0].date_effective < motor_4_rows[1].date_effective);
    }

    #[test]
    fn test_price_for_mount() {
        let price = MotorPrice {
            motor_id: 1,
            date_effective: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            foot_price: 18450.0,
            flange_price: 19920.0,
        };
        assert_eq!(price.price_for(MountType::Foot), 18450.0);
        assert_eq!(price.price_for(MountType::Flange), 19920.0);
    }

    #[test]
    fn test_motor_designation() {
        let motor = &builtin_motors()[3];
        assert_eq!(motor.designation(), "WEG 45kW 2P");
    }

    #[test]
    fn test_load_motor_prices_from_csv() {
        let path = std::env::temp_dir().join("quote_core_motor_prices_ok.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "motor_id,date_effective,foot_price,flange_price").unwrap();
        writeln!(file, "4,2024-09-01,33950.0,36670.0").unwrap();
        writeln!(file, "4,2025-03-01,35650.0,38500.0").unwrap();
        drop(file);

        let prices = load_motor_prices_from_csv(path.to_str().unwrap()).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].motor_id, 4);
        assert_eq!(
            prices[1].date_effective,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(prices[1].flange_price, 38500.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_motor_prices_bad_date() {
        let path = std::env::temp_dir().join("quote_core_motor_prices_bad.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "motor_id,date_effective,foot_price,flange_price").unwrap();
        writeln!(file, "4,01/09/2024,33950.0,36670.0").unwrap();
        drop(file);

        let err = load_motor_prices_from_csv(path.to_str().unwrap()).unwrap_err();
        match err {
            QuoteError::CsvParse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("date_effective"));
            }
            other => panic!("expected CsvParse, got {:?}", other),
        }

        std::fs::remove_file(&path).ok();
    }
}
