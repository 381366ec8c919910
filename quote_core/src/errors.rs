//! # Error Types
//!
//! Structured error types for quote_core. These errors are designed to be
//! informative for both humans and API consumers, carrying enough context
//! to tell a bad request apart from a master-data defect.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> QuoteResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(QuoteError::InvalidCalculationInput {
//!             field: "thickness_mm".to_string(),
//!             value: thickness_mm.to_string(),
//!             reason: "Thickness must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for quoting operations.
///
/// None of these are retried internally: they indicate bad reference data
/// or a bad request, not transient failure. They propagate unchanged from
/// the resolver and calculators up through the aggregator to the caller.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// A formula-type identifier is not in the catalog of known formulas
    #[error("Unsupported {kind} formula type: '{formula_type}'")]
    UnsupportedFormulaType { kind: String, formula_type: String },

    /// A required geometry input is absent and no formula or override supplies it
    #[error("Missing required parameter '{parameter}' for {context}")]
    MissingParameter { parameter: String, context: String },

    /// A calculator received a resolved but semantically wrong input
    #[error("Invalid calculation input for '{field}': {value} - {reason}")]
    InvalidCalculationInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Fan configuration not found in the catalog
    #[error("Fan configuration not found: {reference}")]
    FanConfigurationNotFound { reference: String },

    /// Component not found in the catalog
    #[error("Component not found: {reference}")]
    ComponentNotFound { reference: String },

    /// Motor not found in the catalog
    #[error("Motor not found: {reference}")]
    MotorNotFound { reference: String },

    /// No price row is effective for the motor on the quote date
    #[error("No price for motor {motor_id} effective on {quote_date}")]
    MotorPriceNotFound { motor_id: i64, quote_date: String },

    /// A material cost or labour rate the engine needs is missing
    #[error("Rate not found: {rate_name}")]
    RateNotFound { rate_name: String },

    /// Request-level validation failure (empty selection, bad blade count, etc.)
    #[error("Invalid quote request: {message}")]
    InvalidQuoteRequest { message: String },

    /// Malformed row or field in a master-data CSV
    #[error("CSV parse error at line {line}: {message}")]
    CsvParse { line: usize, message: String },

    /// File I/O error during master-data import
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl QuoteError {
    /// Create an UnsupportedFormulaType error
    pub fn unsupported_formula_type(kind: impl Into<String>, formula_type: impl Into<String>) -> Self {
        QuoteError::UnsupportedFormulaType {
            kind: kind.into(),
            formula_type: formula_type.into(),
        }
    }

    /// Create a MissingParameter error
    pub fn missing_parameter(parameter: impl Into<String>, context: impl Into<String>) -> Self {
        QuoteError::MissingParameter {
            parameter: parameter.into(),
            context: context.into(),
        }
    }

    /// Create an InvalidCalculationInput error
    pub fn invalid_calculation_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::InvalidCalculationInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FanConfigurationNotFound error
    pub fn fan_configuration_not_found(reference: impl Into<String>) -> Self {
        QuoteError::FanConfigurationNotFound {
            reference: reference.into(),
        }
    }

    /// Create a ComponentNotFound error
    pub fn component_not_found(reference: impl Into<String>) -> Self {
        QuoteError::ComponentNotFound {
            reference: reference.into(),
        }
    }

    /// Create a MotorNotFound error
    pub fn motor_not_found(reference: impl Into<String>) -> Self {
        QuoteError::MotorNotFound {
            reference: reference.into(),
        }
    }

    /// Create a RateNotFound error
    pub fn rate_not_found(rate_name: impl Into<String>) -> Self {
        QuoteError::RateNotFound {
            rate_name: rate_name.into(),
        }
    }

    /// Create an InvalidQuoteRequest error
    pub fn invalid_quote_request(message: impl Into<String>) -> Self {
        QuoteError::InvalidQuoteRequest {
            message: message.into(),
        }
    }

    /// Create a CsvParse error
    pub fn csv_parse(line: usize, message: impl Into<String>) -> Self {
        QuoteError::CsvParse {
            line,
            message: message.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check whether this error points at master/reference data rather
    /// than the request (fix the catalog, not the caller)
    pub fn is_data_defect(&self) -> bool {
        matches!(
            self,
            QuoteError::UnsupportedFormulaType { .. }
                | QuoteError::RateNotFound { .. }
                | QuoteError::CsvParse { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::UnsupportedFormulaType { .. } => "UNSUPPORTED_FORMULA_TYPE",
            QuoteError::MissingParameter { .. } => "MISSING_PARAMETER",
            QuoteError::InvalidCalculationInput { .. } => "INVALID_CALCULATION_INPUT",
            QuoteError::FanConfigurationNotFound { .. } => "FAN_CONFIGURATION_NOT_FOUND",
            QuoteError::ComponentNotFound { .. } => "COMPONENT_NOT_FOUND",
            QuoteError::MotorNotFound { .. } => "MOTOR_NOT_FOUND",
            QuoteError::MotorPriceNotFound { .. } => "MOTOR_PRICE_NOT_FOUND",
            QuoteError::RateNotFound { .. } => "RATE_NOT_FOUND",
            QuoteError::InvalidQuoteRequest { .. } => "INVALID_QUOTE_REQUEST",
            QuoteError::CsvParse { .. } => "CSV_PARSE",
            QuoteError::FileError { .. } => "FILE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = QuoteError::unsupported_formula_type("mass", "NOT_A_REAL_TYPE");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: QuoteError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QuoteError::missing_parameter("length_mm", "Inlet Cone").error_code(),
            "MISSING_PARAMETER"
        );
        assert_eq!(
            QuoteError::component_not_found("CASING").error_code(),
            "COMPONENT_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_message_names_offender() {
        let error = QuoteError::unsupported_formula_type("mass", "NOT_A_REAL_TYPE");
        let message = error.to_string();
        assert!(message.contains("NOT_A_REAL_TYPE"));
        assert!(message.contains("mass"));
    }

    #[test]
    fn test_data_defect_classification() {
        assert!(QuoteError::unsupported_formula_type("length", "X").is_data_defect());
        assert!(QuoteError::rate_not_found("steel_s355jr").is_data_defect());
        assert!(!QuoteError::invalid_quote_request("no components").is_data_defect());
    }
}
