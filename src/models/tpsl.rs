use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Directional bet of a TP/SL order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Expecting the price to rise
    Call,
    /// Expecting the price to fall
    Put,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Call => "call",
            Side::Put => "put",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    /// Exact, case-sensitive match on `call` / `put`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(Side::Call),
            "put" => Ok(Side::Put),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named rule set governing which levels are required and how they are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Strategy1,
    Strategy2,
    Strategy3,
    Strategy4,
    Strategy5,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Strategy1,
        Strategy::Strategy2,
        Strategy::Strategy3,
        Strategy::Strategy4,
        Strategy::Strategy5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Strategy1 => "strategy1",
            Strategy::Strategy2 => "strategy2",
            Strategy::Strategy3 => "strategy3",
            Strategy::Strategy4 => "strategy4",
            Strategy::Strategy5 => "strategy5",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four price levels carried by a TP/SL record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TpslField {
    Tp1,
    Tp2,
    Tp3,
    Sl,
}

impl TpslField {
    /// Take-profit tiers, in ascending significance
    pub const TAKE_PROFITS: [TpslField; 3] = [TpslField::Tp1, TpslField::Tp2, TpslField::Tp3];

    /// All levels in comparison order: `sl, tp1, tp2, tp3`
    pub const LADDER: [TpslField; 4] = [TpslField::Sl, TpslField::Tp1, TpslField::Tp2, TpslField::Tp3];

    pub fn as_str(&self) -> &'static str {
        match self {
            TpslField::Tp1 => "tp1",
            TpslField::Tp2 => "tp2",
            TpslField::Tp3 => "tp3",
            TpslField::Sl => "sl",
        }
    }

    /// Chart label for the level
    pub fn label(&self) -> &'static str {
        match self {
            TpslField::Tp1 => "TP1",
            TpslField::Tp2 => "TP2",
            TpslField::Tp3 => "TP3",
            TpslField::Sl => "SL",
        }
    }
}

impl fmt::Display for TpslField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A price level as submitted by the editing surface
///
/// Keeps "missing" apart from "present but unusable" so the validator never
/// has to inspect runtime types:
///
/// - `Absent`: field missing or `null`
/// - `Value`: a number
/// - `OutOfRange`: a finite number too large, or with too many decimal
///   places, to be held as a price; holds the raw input
/// - `Invalid`: text, a boolean, or a non-finite float; holds the raw input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PriceInput {
    #[default]
    Absent,
    Value(Decimal),
    OutOfRange(String),
    Invalid(String),
}

impl PriceInput {
    /// Build from a float, mapping NaN and infinities to `Invalid`
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return PriceInput::Invalid(value.to_string());
        }
        match Decimal::try_from(value) {
            Ok(decimal) => PriceInput::Value(decimal),
            Err(_) => PriceInput::OutOfRange(value.to_string()),
        }
    }

    /// True for any number, including ones outside the price range
    pub fn is_numeric(&self) -> bool {
        matches!(self, PriceInput::Value(_) | PriceInput::OutOfRange(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, PriceInput::Absent)
    }

    /// The numeric value, if any
    pub fn value(&self) -> Option<Decimal> {
        match self {
            PriceInput::Value(value) => Some(*value),
            _ => None,
        }
    }

    fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PriceInput::Absent,
            serde_json::Value::Number(number) => {
                let raw = number.to_string();
                Decimal::from_str(&raw)
                    .or_else(|_| Decimal::from_scientific(&raw))
                    .map(PriceInput::Value)
                    .unwrap_or(PriceInput::OutOfRange(raw))
            }
            serde_json::Value::String(text) => PriceInput::Invalid(text),
            other => PriceInput::Invalid(other.to_string()),
        }
    }
}

impl From<Decimal> for PriceInput {
    fn from(value: Decimal) -> Self {
        PriceInput::Value(value)
    }
}

impl From<Option<Decimal>> for PriceInput {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(PriceInput::Absent, PriceInput::Value)
    }
}

impl fmt::Display for PriceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceInput::Absent => f.write_str("absent"),
            PriceInput::Value(value) => write!(f, "{}", value),
            PriceInput::OutOfRange(raw) => f.write_str(raw),
            PriceInput::Invalid(raw) => write!(f, "{:?}", raw),
        }
    }
}

impl Serialize for PriceInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PriceInput::Absent => serializer.serialize_none(),
            PriceInput::Value(value) => match value.to_f64() {
                Some(float) => serializer.serialize_f64(float),
                None => serializer.serialize_str(&value.to_string()),
            },
            PriceInput::OutOfRange(raw) => match raw.parse::<f64>() {
                Ok(float) => serializer.serialize_f64(float),
                Err(_) => serializer.serialize_str(raw),
            },
            PriceInput::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for PriceInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(PriceInput::from_json)
    }
}

/// Candidate TP/SL record produced by the editing surface
///
/// `side` and `strategy` are kept as submitted; the validator decides whether
/// they name a known value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TpslRecord {
    /// Store-assigned identifier, `None` before creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[schema(example = "AAPL")]
    pub ticker: String,
    #[schema(example = "call")]
    pub side: String,
    #[schema(example = "strategy1")]
    pub strategy: String,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 12.0)]
    pub tp1: PriceInput,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 14.0)]
    pub tp2: PriceInput,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 16.0)]
    pub tp3: PriceInput,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 10.0)]
    pub sl: PriceInput,
}

impl TpslRecord {
    /// New record with every level absent
    pub fn new(ticker: impl Into<String>, side: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self {
            id: None,
            ticker: ticker.into(),
            side: side.into(),
            strategy: strategy.into(),
            tp1: PriceInput::Absent,
            tp2: PriceInput::Absent,
            tp3: PriceInput::Absent,
            sl: PriceInput::Absent,
        }
    }

    /// Set all four levels at once
    pub fn with_levels(
        mut self,
        sl: impl Into<PriceInput>,
        tp1: impl Into<PriceInput>,
        tp2: impl Into<PriceInput>,
        tp3: impl Into<PriceInput>,
    ) -> Self {
        self.sl = sl.into();
        self.tp1 = tp1.into();
        self.tp2 = tp2.into();
        self.tp3 = tp3.into();
        self
    }

    /// Set a single level
    pub fn with_level(mut self, field: TpslField, value: impl Into<PriceInput>) -> Self {
        *self.level_mut(field) = value.into();
        self
    }

    pub fn level(&self, field: TpslField) -> &PriceInput {
        match field {
            TpslField::Tp1 => &self.tp1,
            TpslField::Tp2 => &self.tp2,
            TpslField::Tp3 => &self.tp3,
            TpslField::Sl => &self.sl,
        }
    }

    fn level_mut(&mut self, field: TpslField) -> &mut PriceInput {
        match field {
            TpslField::Tp1 => &mut self.tp1,
            TpslField::Tp2 => &mut self.tp2,
            TpslField::Tp3 => &mut self.tp3,
            TpslField::Sl => &mut self.sl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_parsing_is_exact() {
        assert_eq!("call".parse::<Side>(), Ok(Side::Call));
        assert_eq!("put".parse::<Side>(), Ok(Side::Put));
        assert!("Call".parse::<Side>().is_err());
        assert!("buy".parse::<Side>().is_err());
        assert!(" put".parse::<Side>().is_err());
    }

    #[test]
    fn test_strategy_parsing() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!("strategy6".parse::<Strategy>(), Err("strategy6".to_string()));
    }

    #[test]
    fn test_price_input_from_json() {
        let record: TpslRecord = serde_json::from_str(
            r#"{"ticker":"AAPL","side":"call","strategy":"strategy1",
                "tp1":12.5,"tp2":"14","tp3":true,"sl":null}"#,
        )
        .unwrap();

        assert_eq!(record.tp1, PriceInput::Value(dec!(12.5)));
        assert_eq!(record.tp2, PriceInput::Invalid("14".to_string()));
        assert_eq!(record.tp3, PriceInput::Invalid("true".to_string()));
        assert_eq!(record.sl, PriceInput::Absent);
        assert_eq!(record.id, None);
    }

    #[test]
    fn test_missing_levels_default_to_absent() {
        let record: TpslRecord =
            serde_json::from_str(r#"{"ticker":"SPY","side":"put","strategy":"strategy5","sl":5}"#)
                .unwrap();

        assert!(record.tp1.is_absent());
        assert!(record.tp2.is_absent());
        assert!(record.tp3.is_absent());
        assert_eq!(record.sl.value(), Some(dec!(5)));
    }

    #[test]
    fn test_numbers_outside_price_range() {
        let record: TpslRecord = serde_json::from_str(
            r#"{"ticker":"AAPL","side":"call","strategy":"strategy3",
                "tp1":1e300,"tp2":1e-30,"tp3":100000000000000000000000000000000,"sl":0.5}"#,
        )
        .unwrap();

        for level in [&record.tp1, &record.tp2, &record.tp3] {
            assert!(matches!(level, PriceInput::OutOfRange(_)), "got {:?}", level);
            assert!(level.is_numeric());
            assert_eq!(level.value(), None);
        }
        assert_eq!(record.sl, PriceInput::Value(dec!(0.5)));
        assert!(matches!(PriceInput::from_f64(1e300), PriceInput::OutOfRange(_)));
    }

    #[test]
    fn test_price_input_from_f64_rejects_nan() {
        assert!(!PriceInput::from_f64(f64::NAN).is_numeric());
        assert!(!PriceInput::from_f64(f64::INFINITY).is_numeric());
        assert!(PriceInput::from_f64(101.25).is_numeric());
    }

    #[test]
    fn test_price_input_serializes_as_number() {
        let record = TpslRecord::new("AAPL", "call", "strategy5").with_level(TpslField::Sl, dec!(5.5));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["sl"], serde_json::json!(5.5));
        assert!(json["tp1"].is_null());
        assert!(json.get("id").is_none());
    }
}
