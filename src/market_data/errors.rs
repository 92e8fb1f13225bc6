use thiserror::Error;

/// Errors raised while fetching chart data
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("HTTP request timed out")]
    HttpTimeout,

    /// Configured base URL cannot have a path appended
    #[error("Invalid market data base URL {0:?}")]
    InvalidBaseUrl(String),

    /// Non-success HTTP status from the provider
    #[error("HTTP response (status={0}) error: {1}")]
    HttpResponse(reqwest::StatusCode, String),

    /// Provider answered with an error object
    #[error("Provider error {code}: {description}")]
    Provider { code: String, description: String },

    /// Provider answered but had no bars for the ticker
    #[error("No price data for {0}")]
    NoData(String),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(error: reqwest::Error) -> Self {
        match error {
            error if error.is_timeout() => MarketDataError::HttpTimeout,
            error => MarketDataError::Http(error),
        }
    }
}
