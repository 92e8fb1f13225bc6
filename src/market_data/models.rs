use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::MarketDataError;

/// One OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/*----- */
// Yahoo chart API payload
/*----- */
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented OHLCV series; gaps are `null`
#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartEnvelope {
    /// Convert the column series into bars
    ///
    /// Rows without a close are dropped; other missing values fall back to
    /// the close (prices) or zero (volume).
    pub fn into_bars(self, ticker: &str) -> Result<Vec<PriceBar>, MarketDataError> {
        if let Some(error) = self.chart.error {
            return Err(MarketDataError::Provider {
                code: error.code,
                description: error.description,
            });
        }

        let result = self
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| MarketDataError::NoData(ticker.to_string()))?;

        let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

        let bars: Vec<PriceBar> = result
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let close = quote.close.get(i).copied().flatten()?;
                let timestamp = DateTime::<Utc>::from_timestamp(*ts, 0)?;
                let price = |series: &[Option<f64>]| series.get(i).copied().flatten().unwrap_or(close);

                Some(PriceBar {
                    timestamp,
                    open: price(&quote.open),
                    high: price(&quote.high),
                    low: price(&quote.low),
                    close,
                    volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
                })
            })
            .collect();

        if bars.is_empty() {
            return Err(MarketDataError::NoData(ticker.to_string()));
        }

        Ok(bars)
    }
}
