// Library Crate Root
// lib.rs

// main.rs imports through lib.rs like an external crate
pub mod api;
pub mod config;
pub mod database;
pub mod market_data;
pub mod models;
pub mod tpsl;
pub mod validator;

// pub use = re-export at crate root
pub use api::{create_router, AppState};
pub use config::AppConfig;
pub use models::{PriceInput, Side, Strategy, TpslField, TpslRecord};
pub use tpsl::{TpslService, TpslServiceError};
pub use validator::{validate_tpsl, TpslValidationError};
