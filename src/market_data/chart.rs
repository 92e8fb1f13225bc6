use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::models::TpslOrder;

use super::models::PriceBar;

/// Horizontal price line for one TP/SL level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LevelLine {
    /// Order the level belongs to
    pub order_id: i64,
    /// `TP1`, `TP2`, `TP3` or `SL`
    #[schema(example = "TP1")]
    pub label: String,
    #[schema(example = 12.0)]
    pub price: f64,
}

/// Price bars plus the TP/SL levels to draw over them
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChartOverlay {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
    pub levels: Vec<LevelLine>,
}

impl ChartOverlay {
    /// Combine bars with the levels of every order on `ticker`
    ///
    /// Orders for other tickers are ignored; absent levels draw no line.
    pub fn build(ticker: &str, bars: Vec<PriceBar>, orders: &[TpslOrder]) -> Self {
        let levels = orders
            .iter()
            .filter(|order| order.ticker == ticker)
            .flat_map(|order| {
                order.levels().into_iter().filter_map(move |(field, price)| {
                    Some(LevelLine {
                        order_id: order.id,
                        label: field.label().to_string(),
                        price: price.to_f64()?,
                    })
                })
            })
            .collect();

        Self {
            ticker: ticker.to_string(),
            bars,
            levels,
        }
    }
}
