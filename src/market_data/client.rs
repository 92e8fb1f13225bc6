use std::time::Duration;

use chrono::Utc;
use reqwest::Url;

use crate::config::MarketDataConfig;

use super::errors::MarketDataError;
use super::models::{ChartEnvelope, PriceBar};

/// Source of recent price bars for a ticker
#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Bars covering the configured lookback window, oldest first
    async fn fetch_bars(&self, ticker: &str) -> Result<Vec<PriceBar>, MarketDataError>;
}

/*----- */
// Yahoo Finance chart API
/*----- */
#[derive(Debug, Clone)]
pub struct YahooChartClient {
    http: reqwest::Client,
    base_url: Url,
    lookback: chrono::Duration,
    interval: String,
}

impl YahooChartClient {
    pub fn new(config: &MarketDataConfig) -> Result<Self, MarketDataError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| MarketDataError::InvalidBaseUrl(config.base_url.clone()))?;

        Ok(Self {
            http,
            base_url,
            lookback: chrono::Duration::days(config.lookback_days),
            interval: config.interval.clone(),
        })
    }

    /// `{base}/v8/finance/chart/{ticker}` with the ticker encoded as one path segment
    fn chart_url(&self, ticker: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", ticker]);
        }
        url
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooChartClient {
    async fn fetch_bars(&self, ticker: &str) -> Result<Vec<PriceBar>, MarketDataError> {
        let end = Utc::now();
        let start = end - self.lookback;

        tracing::debug!(
            "Fetching {} bars for {} from {} to {}",
            self.interval,
            ticker,
            start,
            end
        );

        let response = self
            .http
            .get(self.chart_url(ticker))
            .query(&[
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
                ("interval", self.interval.clone()),
                ("includePrePost", "false".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Market data request for {} failed with {}", ticker, status);
            return Err(MarketDataError::HttpResponse(status, body));
        }

        let bars = response.json::<ChartEnvelope>().await?.into_bars(ticker)?;

        tracing::debug!("Fetched {} bars for {}", bars.len(), ticker);
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_url() {
        let config = MarketDataConfig {
            base_url: "https://example.test/".to_string(),
            ..MarketDataConfig::default()
        };
        let client = YahooChartClient::new(&config).unwrap();

        assert_eq!(
            client.chart_url("AAPL").as_str(),
            "https://example.test/v8/finance/chart/AAPL"
        );
        assert_eq!(client.lookback, chrono::Duration::days(7));
    }

    #[test]
    fn test_chart_url_keeps_ticker_in_one_segment() {
        let config = MarketDataConfig {
            base_url: "https://example.test/proxy".to_string(),
            ..MarketDataConfig::default()
        };
        let client = YahooChartClient::new(&config).unwrap();

        let url = client.chart_url("BRK/B");
        assert_eq!(url.path(), "/proxy/v8/finance/chart/BRK%2FB");

        let url = client.chart_url("../../v7/finance/quote?symbols=X#");
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        assert_eq!(segments.len(), 5);
        assert_eq!(&segments[..4], ["proxy", "v8", "finance", "chart"]);
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_invalid_base_url() {
        let config = MarketDataConfig {
            base_url: "not a url".to_string(),
            ..MarketDataConfig::default()
        };

        assert!(matches!(
            YahooChartClient::new(&config),
            Err(MarketDataError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    #[ignore]
    async fn test_fetch_live_bars() {
        // Hits the public chart API
        let client = YahooChartClient::new(&MarketDataConfig::default()).unwrap();
        let bars = client.fetch_bars("AAPL").await.unwrap();
        assert!(!bars.is_empty());
    }
}
