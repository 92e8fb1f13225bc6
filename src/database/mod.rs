//! Database module for the TP/SL order table
//!
//! This module provides:
//! - Connection pooling for PostgreSQL
//! - Embedded migrations
//! - Repository pattern implementations
//! - Database models and schema

pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{
    establish_connection_pool, get_connection, run_pending_migrations, DatabaseError, PgPool,
};
