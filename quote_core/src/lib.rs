//! # quote_core - Axial Fan Quoting Engine
//!
//! `quote_core` is the calculation engine behind our axial fan quoting tools,
//! turning a fan configuration, a component selection, and a motor choice into
//! a fully priced quote. All inputs and outputs are JSON-serializable, making
//! it easy to drive from a CLI, a web API, or an AI assistant.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Formula-Driven**: Components describe their geometry by formula code;
//!   calculators are selected by dispatch, never hard-wired per component
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::catalog::builtin_catalog;
//! use quote_core::quote::{calculate_quote, QuoteRequest};
//! use quote_core::rates::builtin_rate_table;
//!
//! let catalog = builtin_catalog();
//! let rates = builtin_rate_table();
//!
//! // Price the auto-selected structural set on the Ø762 fan
//! let fan = catalog.fan_by_uid("Ø762-Ø472").unwrap();
//! let request = QuoteRequest::new(fan.id, fan.auto_selected_components.clone());
//!
//! let totals = calculate_quote(&request, &catalog, &rates).unwrap();
//! assert!(totals.grand_total > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Fans, components, motors, and price history
//! - [`resolver`] - Override-then-formula parameter resolution
//! - [`calculators`] - Mass and cost calculators plus the dispatch factory
//! - [`formulas`] - Named diameter, length, and stiffening formulas
//! - [`quote`] - Quote aggregation: components, motor, buyouts, markup
//! - [`rates`] - Material and labour rate table
//! - [`errors`] - Structured error types

pub mod calculators;
pub mod catalog;
pub mod errors;
pub mod formulas;
pub mod quote;
pub mod rates;
pub mod resolver;

// Re-export commonly used types at crate root for convenience
pub use errors::{QuoteError, QuoteResult};
pub use quote::{calculate_component, calculate_quote, QuoteRequest, QuoteTotals};
pub use rates::{builtin_rate_table, RateTable};
