//! TP/SL Order Module
//!
//! Write path for TP/SL orders: every insert and update goes through the
//! validator before reaching the repository.
//! - `errors` - Error types for order operations
//! - `service` - Order service tying validation to persistence

pub mod errors;
pub mod service;

pub use errors::TpslServiceError;
pub use service::TpslService;
