//! Error types for TP/SL validation
//!
//! Every rejection is a distinct variant so callers (and tests) can branch on
//! the kind of failure instead of parsing a message.

use thiserror::Error;

use crate::models::{Side, Strategy, TpslField};

/// Reasons a candidate TP/SL record is refused before it reaches the store
///
/// # Error Categories
///
/// - **Terminology**: `InvalidSide`, `UnrecognizedStrategy`
/// - **Presence**: `MissingOrInvalidField`, `EmptyTicker`
/// - **Range**: `OutOfRangeLevel`
/// - **Consistency**: `OrderingViolation`
///
/// None of these are retryable: the same record always yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TpslValidationError {
    /// Side is neither `call` nor `put`
    #[error("Invalid side: {0:?} (expected \"call\" or \"put\")")]
    InvalidSide(String),

    /// Strategy is not one of `strategy1`..`strategy5`
    #[error("Unrecognized strategy: {0:?}")]
    UnrecognizedStrategy(String),

    /// A level required to be numeric is missing or non-numeric, or a level
    /// required to be absent is present
    #[error("Missing or invalid field(s) {}: {expected}", join_fields(.fields))]
    MissingOrInvalidField {
        fields: Vec<TpslField>,
        expected: String,
    },

    /// A level is a number but cannot be held as a price
    #[error("Level {field} is out of range: {raw}")]
    OutOfRangeLevel { field: TpslField, raw: String },

    /// Levels are numeric but break the strategy/side ordering rule
    #[error("Ordering violation for {strategy}/{side}: expected {expected}, got {actual}")]
    OrderingViolation {
        strategy: Strategy,
        side: Side,
        expected: &'static str,
        actual: String,
    },

    /// Ticker is empty or whitespace
    #[error("Ticker must not be empty")]
    EmptyTicker,
}

impl TpslValidationError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            TpslValidationError::InvalidSide(_) => "InvalidSide",
            TpslValidationError::UnrecognizedStrategy(_) => "UnrecognizedStrategy",
            TpslValidationError::MissingOrInvalidField { .. } => "MissingOrInvalidField",
            TpslValidationError::OutOfRangeLevel { .. } => "OutOfRangeLevel",
            TpslValidationError::OrderingViolation { .. } => "OrderingViolation",
            TpslValidationError::EmptyTicker => "EmptyTicker",
        }
    }
}

fn join_fields(fields: &[TpslField]) -> String {
    fields
        .iter()
        .map(TpslField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TpslValidationError::InvalidSide("long".to_string());
        assert_eq!(err.to_string(), "Invalid side: \"long\" (expected \"call\" or \"put\")");

        let err = TpslValidationError::MissingOrInvalidField {
            fields: vec![TpslField::Tp2, TpslField::Sl],
            expected: "strategy1 requires numeric tp1, tp2, tp3 and sl".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing or invalid field(s) tp2, sl: strategy1 requires numeric tp1, tp2, tp3 and sl"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(TpslValidationError::EmptyTicker.kind(), "EmptyTicker");
        assert_eq!(
            TpslValidationError::UnrecognizedStrategy("x".to_string()).kind(),
            "UnrecognizedStrategy"
        );

        let err = TpslValidationError::OutOfRangeLevel {
            field: TpslField::Tp3,
            raw: "1e300".to_string(),
        };
        assert_eq!(err.kind(), "OutOfRangeLevel");
        assert_eq!(err.to_string(), "Level tp3 is out of range: 1e300");
    }
}
