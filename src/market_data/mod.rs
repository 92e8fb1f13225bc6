//! Market data module
//!
//! Fetches recent price bars for a ticker and lines them up with the TP/SL
//! levels stored for it, ready for a charting layer to plot.

pub mod chart;
pub mod client;
pub mod errors;
pub mod models;

pub use chart::{ChartOverlay, LevelLine};
pub use client::{MarketDataProvider, YahooChartClient};
pub use errors::MarketDataError;
pub use models::PriceBar;
