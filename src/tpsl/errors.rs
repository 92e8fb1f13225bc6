//! Error types for TP/SL order operations

use thiserror::Error;

use crate::database::DatabaseError;
use crate::validator::TpslValidationError;

/// Errors that can occur while reading or writing TP/SL orders
///
/// # Error Categories
///
/// - **Validation Errors**: `Validation` (never retried, the record is refused as-is)
/// - **State Errors**: `OrderNotFound`
/// - **Store Errors**: `Store`, relayed from the persistence layer without interpretation,
///   and `TaskFailed`
#[derive(Debug, Error)]
pub enum TpslServiceError {
    /// The candidate record failed validation; nothing was written
    #[error(transparent)]
    Validation(#[from] TpslValidationError),

    /// No order with the specified ID exists
    #[error("TP/SL order not found: {0}")]
    OrderNotFound(i64),

    /// The store rejected or failed the operation
    #[error("Store error: {0}")]
    Store(#[from] DatabaseError),

    /// The blocking task running the store call panicked or was cancelled
    #[error("Store task failed: {0}")]
    TaskFailed(String),
}

impl TpslServiceError {
    /// Returns true if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, TpslServiceError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_passed_through() {
        let err: TpslServiceError = TpslValidationError::InvalidSide("long".to_string()).into();

        assert!(err.is_validation_error());
        assert_eq!(
            err.to_string(),
            TpslValidationError::InvalidSide("long".to_string()).to_string()
        );
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            TpslServiceError::OrderNotFound(9).to_string(),
            "TP/SL order not found: 9"
        );
    }
}
