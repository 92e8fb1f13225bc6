//! TP/SL record validation functions
//!
//! All checks that run before a record is inserted or updated live here. The
//! stages run in a fixed order (side, required inputs, range, ordering)
//! because the ordering rules depend on the side and compare exact prices.
//!
//! Every function is pure: no I/O, no shared state, same input same result.

use rust_decimal::Decimal;

use crate::models::{PriceInput, Side, Strategy, TpslField, TpslRecord};

use super::errors::TpslValidationError;
use super::rules::{Direction, FieldRequirement};

// ============================================================================
// Individual Validation Functions
// ============================================================================

/// Validate that the side is exactly `call` or `put`
///
/// # Returns
/// * `Ok(Side)` with the parsed side
/// * `Err(TpslValidationError::InvalidSide)` naming the offending value
pub fn validate_side_terminology(record: &TpslRecord) -> Result<Side, TpslValidationError> {
    record
        .side
        .parse::<Side>()
        .map_err(TpslValidationError::InvalidSide)
}

/// Validate which levels are present for the record's strategy
///
/// # Rules
/// - `strategy1`, `strategy2`, `strategy4`: `tp1`, `tp2`, `tp3`, `sl` all numeric
/// - `strategy5`: `sl` numeric, `tp1`, `tp2`, `tp3` absent
/// - `strategy3`: nothing required, but a present level must be numeric
///
/// # Returns
/// * `Ok(Strategy)` with the parsed strategy
/// * `Err(TpslValidationError::UnrecognizedStrategy)` for an unknown strategy
/// * `Err(TpslValidationError::MissingOrInvalidField)` listing every offending field
pub fn validate_required_inputs(record: &TpslRecord) -> Result<Strategy, TpslValidationError> {
    let strategy = record
        .strategy
        .parse::<Strategy>()
        .map_err(TpslValidationError::UnrecognizedStrategy)?;

    let (fields, expected): (Vec<TpslField>, String) = match strategy.rule().fields {
        FieldRequirement::AllLevels => (
            TpslField::LADDER
                .into_iter()
                .filter(|field| !record.level(*field).is_numeric())
                .collect(),
            format!("{} requires numeric tp1, tp2, tp3 and sl", strategy),
        ),
        FieldRequirement::StopLossOnly => {
            let sl_missing = (!record.sl.is_numeric()).then_some(TpslField::Sl);
            let tps_present = TpslField::TAKE_PROFITS
                .into_iter()
                .filter(|field| !record.level(*field).is_absent());
            (
                sl_missing.into_iter().chain(tps_present).collect(),
                format!("{} requires numeric sl and no tp1, tp2 or tp3", strategy),
            )
        }
        FieldRequirement::Unconstrained => (
            TpslField::LADDER
                .into_iter()
                .filter(|field| matches!(record.level(*field), PriceInput::Invalid(_)))
                .collect(),
            format!("{} accepts only numeric or absent levels", strategy),
        ),
    };

    if fields.is_empty() {
        Ok(strategy)
    } else {
        Err(TpslValidationError::MissingOrInvalidField { fields, expected })
    }
}

/// Validate that every numeric level can be held as an exact price
///
/// Runs after [`validate_required_inputs`], which already treats these
/// numbers as present. Reports the first offending level in ladder order.
///
/// # Returns
/// * `Err(TpslValidationError::OutOfRangeLevel)` with the raw number
pub fn validate_level_range(record: &TpslRecord) -> Result<(), TpslValidationError> {
    for field in TpslField::LADDER {
        if let PriceInput::OutOfRange(raw) = record.level(field) {
            return Err(TpslValidationError::OutOfRangeLevel {
                field,
                raw: raw.clone(),
            });
        }
    }
    Ok(())
}

/// Validate that the levels follow the strategy's ordering rule
///
/// Takes the side and strategy returned by the earlier stages, so it can only
/// be called once those have passed. Comparisons are strict: equal adjacent
/// levels are a violation.
///
/// # Rules
/// - `strategy1`/`strategy2` + `call`: `sl < tp1 < tp2 < tp3`
/// - `strategy1`/`strategy2` + `put`: `sl > tp1 > tp2 > tp3`
/// - `strategy4`: `sl < tp1 < tp2 < tp3` for either side
/// - `strategy3`, `strategy5`: not checked
pub fn validate_ordering(
    record: &TpslRecord,
    side: Side,
    strategy: Strategy,
) -> Result<(), TpslValidationError> {
    let Some(direction) = strategy.rule().ordering.direction(side) else {
        return Ok(());
    };

    let ladder = numeric_ladder(record).ok_or_else(|| TpslValidationError::MissingOrInvalidField {
        fields: TpslField::LADDER
            .into_iter()
            .filter(|field| !record.level(*field).is_numeric())
            .collect(),
        expected: format!("{} ordering needs numeric tp1, tp2, tp3 and sl", strategy),
    })?;

    let ordered = ladder.windows(2).all(|pair| match direction {
        Direction::Ascending => pair[0] < pair[1],
        Direction::Descending => pair[0] > pair[1],
    });

    if ordered {
        Ok(())
    } else {
        Err(TpslValidationError::OrderingViolation {
            strategy,
            side,
            expected: direction.relation(),
            actual: format!(
                "sl={}, tp1={}, tp2={}, tp3={}",
                ladder[0], ladder[1], ladder[2], ladder[3]
            ),
        })
    }
}

/// Validate that the ticker carries at least one non-whitespace character
pub fn validate_ticker(record: &TpslRecord) -> Result<(), TpslValidationError> {
    if record.ticker.trim().is_empty() {
        return Err(TpslValidationError::EmptyTicker);
    }
    Ok(())
}

/// `[sl, tp1, tp2, tp3]` when all four are numeric
fn numeric_ladder(record: &TpslRecord) -> Option<[Decimal; 4]> {
    Some([
        record.sl.value()?,
        record.tp1.value()?,
        record.tp2.value()?,
        record.tp3.value()?,
    ])
}

// ============================================================================
// Composite Validation Function
// ============================================================================

/// Validate a TP/SL record before it is inserted or updated
///
/// This is the **single entry point** used by the write path. It returns the
/// first error encountered, unchanged.
///
/// # Validations Performed
/// 1. Side is `call` or `put`
/// 2. Strategy is known and the right levels are present
/// 3. Numeric levels fit the price range
/// 4. Levels are ordered as the strategy and side require
/// 5. Ticker is not empty
pub fn validate_tpsl(record: &TpslRecord) -> Result<(), TpslValidationError> {
    let side = validate_side_terminology(record)?;
    let strategy = validate_required_inputs(record)?;
    validate_level_range(record)?;
    validate_ordering(record, side, strategy)?;
    validate_ticker(record)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
