use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing TP/SL orders
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TpslListQuery {
    /// Only return orders for this ticker
    pub ticker: Option<String>,
}

/// Outcome of a dry-run validation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    /// Error kind when invalid (e.g., "OrderingViolation")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResponse {
    pub fn valid() -> Self {
        Self {
            valid: true,
            kind: None,
            message: None,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Validation error kind, when the request was refused by the validator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
