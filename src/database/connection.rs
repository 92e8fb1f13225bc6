use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Type alias for PostgreSQL connection pool
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Type alias for pooled connection
pub type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

/// Migrations compiled into the binary
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

/// Establish the connection pool for the TP/SL table
///
/// Checks out one connection up front so a bad URL fails at startup rather
/// than on the first request.
pub fn establish_connection_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    tracing::info!("Establishing database connection pool...");

    let manager = ConnectionManager::<PgConnection>::new(&config.url);
    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .build(manager)
        .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))?;

    tracing::info!("Database pool created with max size: {}", config.pool_size);

    let _ = pool
        .get()
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    tracing::info!("Database connection successful");

    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &PgPool) -> Result<PgPooledConnection, DatabaseError> {
    pool.get()
        .map_err(|e| DatabaseError::ConnectionPoolError(e.to_string()))
}

/// Apply any embedded migrations not yet run against the database
pub fn run_pending_migrations(pool: &PgPool) -> Result<usize, DatabaseError> {
    let mut conn = get_connection(pool)?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    tracing::info!("Applied {} pending migration(s)", applied.len());
    Ok(applied.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_pool_creation() {
        // Requires a reachable database; skipped when DATABASE_URL is unset
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return;
        };

        let config = DatabaseConfig {
            url,
            pool_size: 2,
            connection_timeout_secs: 5,
            run_migrations: false,
        };

        let result = establish_connection_pool(&config);
        assert!(result.is_ok(), "Failed to create database pool");
    }

    #[test]
    fn test_error_display() {
        let err = DatabaseError::ConnectionFailed("refused".to_string());
        assert_eq!(err.to_string(), "Connection failed: refused");
    }
}
