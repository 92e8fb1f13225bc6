use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{TpslField, TpslRecord};
use crate::validator::{validate_tpsl, TpslValidationError};

/// TP/SL order entity - one row of the TP/SL table
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::tpsl_orders)]
#[diesel(primary_key(id))]
pub struct TpslOrder {
    /// Store-assigned ID
    pub id: i64,

    /// Instrument symbol (e.g., "AAPL")
    pub ticker: String,

    /// `call` or `put`
    pub side: String,

    /// `strategy1`..`strategy5`
    pub strategy: String,

    /// Take-profit tier 1
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 12.0)]
    pub tp1: Option<Decimal>,

    /// Take-profit tier 2
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 14.0)]
    pub tp2: Option<Decimal>,

    /// Take-profit tier 3
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 16.0)]
    pub tp3: Option<Decimal>,

    /// Stop loss
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>, example = 10.0)]
    pub sl: Option<Decimal>,

    /// Timestamp when record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when record was last updated
    pub updated_at: DateTime<Utc>,
}

impl TpslOrder {
    /// Build a stored row from its insertable form
    pub fn from_new(id: i64, new_order: NewTpslOrder, now: DateTime<Utc>) -> Self {
        Self {
            id,
            ticker: new_order.ticker,
            side: new_order.side,
            strategy: new_order.strategy,
            tp1: new_order.tp1,
            tp2: new_order.tp2,
            tp3: new_order.tp3,
            sl: new_order.sl,
            created_at: now,
            updated_at: now,
        }
    }

    /// Present levels in ladder order (`sl, tp1, tp2, tp3`)
    pub fn levels(&self) -> Vec<(TpslField, Decimal)> {
        TpslField::LADDER
            .into_iter()
            .filter_map(|field| {
                let value = match field {
                    TpslField::Tp1 => self.tp1,
                    TpslField::Tp2 => self.tp2,
                    TpslField::Tp3 => self.tp3,
                    TpslField::Sl => self.sl,
                };
                value.map(|price| (field, price))
            })
            .collect()
    }
}

/// Editable columns of a TP/SL order, used for both insert and full-replace update
///
/// Only obtainable from a [`TpslRecord`] that passed validation; the fields
/// are private so it cannot be built any other way.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = crate::database::schema::tpsl_orders)]
#[diesel(treat_none_as_null = true)]
pub struct NewTpslOrder {
    ticker: String,
    side: String,
    strategy: String,
    tp1: Option<Decimal>,
    tp2: Option<Decimal>,
    tp3: Option<Decimal>,
    sl: Option<Decimal>,
}

impl NewTpslOrder {
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn side(&self) -> &str {
        &self.side
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn level(&self, field: TpslField) -> Option<Decimal> {
        match field {
            TpslField::Tp1 => self.tp1,
            TpslField::Tp2 => self.tp2,
            TpslField::Tp3 => self.tp3,
            TpslField::Sl => self.sl,
        }
    }
}

impl TryFrom<&TpslRecord> for NewTpslOrder {
    type Error = TpslValidationError;

    fn try_from(record: &TpslRecord) -> Result<Self, Self::Error> {
        validate_tpsl(record)?;

        Ok(Self {
            ticker: record.ticker.clone(),
            side: record.side.clone(),
            strategy: record.strategy.clone(),
            tp1: record.tp1.value(),
            tp2: record.tp2.value(),
            tp3: record.tp3.value(),
            sl: record.sl.value(),
        })
    }
}
