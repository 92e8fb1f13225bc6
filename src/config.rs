//! Application configuration
//!
//! Built once in `main` from the process environment (after `.env` is loaded)
//! and handed to the components that need it. Nothing reads the environment
//! after startup.

use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid bind address {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },
}

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    pub bind_addr: SocketAddr,

    /// TP/SL table connection; `None` runs against the in-memory store
    pub database: Option<DatabaseConfig>,

    /// Chart data provider
    pub market_data: MarketDataConfig,
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL URL
    pub url: String,

    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Pool checkout timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub connection_timeout_secs: u64,

    /// Run embedded migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

/// Market data provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// Base URL of the chart API
    #[serde(default = "default_market_data_base_url")]
    pub base_url: String,

    /// How many days of bars to fetch
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    /// Bar interval (e.g., "5m")
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_data_base_url(),
            lookback_days: default_lookback_days(),
            interval: default_interval(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Numeric values that fail to parse fall back to their default with a
    /// warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_value = lookup("BIND_ADDR").unwrap_or_else(default_bind_addr);
        let bind_addr = SocketAddr::from_str(&bind_value).map_err(|e| ConfigError::InvalidBindAddr {
            value: bind_value.clone(),
            reason: e.to_string(),
        })?;

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                pool_size: parse_or(&lookup, "DB_POOL_MAX_SIZE", default_pool_size()),
                connection_timeout_secs: parse_or(
                    &lookup,
                    "DB_CONNECTION_TIMEOUT_SECS",
                    default_timeout_secs(),
                ),
                run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", false),
            });

        let market_data = MarketDataConfig {
            base_url: lookup("MARKET_DATA_BASE_URL").unwrap_or_else(default_market_data_base_url),
            lookback_days: parse_or(&lookup, "MARKET_DATA_LOOKBACK_DAYS", default_lookback_days()),
            interval: lookup("MARKET_DATA_INTERVAL").unwrap_or_else(default_interval),
            timeout_secs: parse_or(&lookup, "MARKET_DATA_TIMEOUT_SECS", default_timeout_secs()),
        };

        Ok(Self {
            bind_addr,
            database,
            market_data,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("⚠️  {}={:?} is not valid, using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}

// Default value functions for serde
fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_market_data_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_lookback_days() -> i64 {
    7
}

fn default_interval() -> String {
    "5m".to_string()
}
