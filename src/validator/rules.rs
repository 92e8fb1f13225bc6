//! Strategy rule table
//!
//! Each strategy maps to exactly one (field requirement, ordering rule) pair.
//! Adding a strategy means adding one arm to [`Strategy::rule`].

use crate::models::{Side, Strategy};

/// Which levels must be numeric and which must be absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRequirement {
    /// `tp1`, `tp2`, `tp3` and `sl` all numeric
    AllLevels,
    /// `sl` numeric, every take-profit absent
    StopLossOnly,
    /// No required level; anything present must still be numeric
    Unconstrained,
}

/// How the ladder `sl, tp1, tp2, tp3` must be ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingRule {
    /// Ascending for `call`, descending for `put`
    BySide,
    /// Ascending whatever the side
    Ascending,
    /// No ordering check
    Unchecked,
}

/// Direction resolved from an ordering rule and a side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Human-readable relation used in error messages
    pub fn relation(&self) -> &'static str {
        match self {
            Direction::Ascending => "sl < tp1 < tp2 < tp3",
            Direction::Descending => "sl > tp1 > tp2 > tp3",
        }
    }
}

/// Field requirement and ordering rule of one strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyRule {
    pub fields: FieldRequirement,
    pub ordering: OrderingRule,
}

impl Strategy {
    pub fn rule(&self) -> StrategyRule {
        let (fields, ordering) = match self {
            Strategy::Strategy1 | Strategy::Strategy2 => {
                (FieldRequirement::AllLevels, OrderingRule::BySide)
            }
            Strategy::Strategy3 => (FieldRequirement::Unconstrained, OrderingRule::Unchecked),
            Strategy::Strategy4 => (FieldRequirement::AllLevels, OrderingRule::Ascending),
            Strategy::Strategy5 => (FieldRequirement::StopLossOnly, OrderingRule::Unchecked),
        };
        StrategyRule { fields, ordering }
    }
}

impl OrderingRule {
    /// Direction the ladder must follow, or `None` when unchecked
    pub fn direction(&self, side: Side) -> Option<Direction> {
        match (self, side) {
            (OrderingRule::BySide, Side::Call) => Some(Direction::Ascending),
            (OrderingRule::BySide, Side::Put) => Some(Direction::Descending),
            (OrderingRule::Ascending, _) => Some(Direction::Ascending),
            (OrderingRule::Unchecked, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table() {
        assert_eq!(Strategy::Strategy1.rule(), Strategy::Strategy2.rule());
        assert_eq!(Strategy::Strategy4.rule().fields, FieldRequirement::AllLevels);
        assert_eq!(Strategy::Strategy5.rule().fields, FieldRequirement::StopLossOnly);
        assert_eq!(Strategy::Strategy3.rule().ordering, OrderingRule::Unchecked);
    }

    #[test]
    fn test_direction_by_side() {
        let by_side = Strategy::Strategy1.rule().ordering;
        assert_eq!(by_side.direction(Side::Call), Some(Direction::Ascending));
        assert_eq!(by_side.direction(Side::Put), Some(Direction::Descending));

        let strategy4 = Strategy::Strategy4.rule().ordering;
        assert_eq!(strategy4.direction(Side::Put), Some(Direction::Ascending));

        assert_eq!(Strategy::Strategy5.rule().ordering.direction(Side::Call), None);
    }
}
