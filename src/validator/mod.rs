//! TP/SL Validator Module
//!
//! Decides whether a candidate TP/SL record is internally consistent before
//! it is written:
//! - `errors` - Validation error kinds
//! - `rules` - Per-strategy field and ordering rules
//! - `validation` - Validation stages and the composite entry point

pub mod errors;
pub mod rules;
pub mod validation;

pub use errors::TpslValidationError;
pub use rules::{Direction, FieldRequirement, OrderingRule, StrategyRule};
pub use validation::{
    validate_level_range, validate_ordering, validate_required_inputs, validate_side_terminology,
    validate_ticker, validate_tpsl,
};
