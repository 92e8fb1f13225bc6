//! Repository pattern implementations for TP/SL orders
//!
//! - `TpslRepositoryImpl`: PostgreSQL via Diesel
//! - `InMemoryTpslRepository`: process-local store for running without a database

pub mod in_memory_repository;
pub mod tpsl_repository;

pub use in_memory_repository::InMemoryTpslRepository;
pub use tpsl_repository::{TpslRepository, TpslRepositoryImpl};
