use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Multi-family guideline percentages in basis points. Rows are the number of
/// other children the obligor supports (0..=7); columns are the children
/// before the court (1..=7).
const TEXAS_MULTI_FAMILY_BPS: [[i64; 7]; 8] = [
    [2000, 2500, 3000, 3500, 4000, 4000, 4000],
    [1750, 2250, 2738, 3220, 3733, 3771, 3800],
    [1600, 2063, 2520, 3033, 3543, 3600, 3644],
    [1475, 1900, 2400, 2900, 3400, 3467, 3520],
    [1360, 1833, 2314, 2800, 3289, 3360, 3418],
    [1333, 1786, 2250, 2722, 3200, 3273, 3333],
    [1314, 1750, 2200, 2660, 3127, 3200, 3262],
    [1300, 1722, 2160, 2609, 3077, 3138, 3200],
];

/// Supplies the payment amount in effect for a given number of children.
pub trait PaymentGuideline {
    /// `initial` is the ordered amount while all `subject_count` children are
    /// counted; the result is the amount once only `active_count` remain.
    fn amount_for(
        &self,
        initial: Decimal,
        subject_count: usize,
        active_count: usize,
        not_before_court: usize,
    ) -> Decimal;
}

/// Built-in payment tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amounts")]
pub enum Guideline {
    /// Scales the initial amount along the Texas multi-family percentages.
    #[default]
    Texas,
    /// The amount never steps down.
    Flat,
    /// Explicit amounts, index 0 holding the amount for one child.
    Table(Vec<Decimal>),
}

impl PaymentGuideline for Guideline {
    fn amount_for(
        &self,
        initial: Decimal,
        subject_count: usize,
        active_count: usize,
        not_before_court: usize,
    ) -> Decimal {
        if active_count == 0 {
            return Decimal::ZERO;
        }
        match self {
            Guideline::Flat => initial,
            Guideline::Table(amounts) => amounts
                .get(active_count - 1)
                .or_else(|| amounts.last())
                .copied()
                .unwrap_or(initial),
            Guideline::Texas => {
                if active_count >= subject_count {
                    return initial;
                }
                let full = texas_percentage(subject_count, not_before_court);
                let reduced = texas_percentage(active_count, not_before_court);
                if full.is_zero() {
                    return initial;
                }
                round_cents(initial * reduced / full)
            }
        }
    }
}

fn texas_percentage(children_before_court: usize, not_before_court: usize) -> Decimal {
    if children_before_court == 0 {
        return Decimal::ZERO;
    }
    let row = not_before_court.min(TEXAS_MULTI_FAMILY_BPS.len() - 1);
    let col = children_before_court.min(TEXAS_MULTI_FAMILY_BPS[0].len()) - 1;
    Decimal::new(TEXAS_MULTI_FAMILY_BPS[row][col], 2)
}

pub(crate) fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn texas_steps_follow_percentages() {
        let guideline = Guideline::Texas;
        assert_eq!(guideline.amount_for(dec!(1200.00), 3, 3, 0), dec!(1200.00));
        assert_eq!(guideline.amount_for(dec!(1200.00), 3, 2, 0), dec!(1000.00));
        assert_eq!(guideline.amount_for(dec!(1200.00), 3, 1, 0), dec!(800.00));
    }

    #[test]
    fn texas_uses_multi_family_row() {
        let guideline = Guideline::Texas;
        // 17.50% / 22.50% of 900.00
        assert_eq!(guideline.amount_for(dec!(900.00), 2, 1, 1), dec!(700.00));
    }

    #[test]
    fn texas_rounds_to_cents() {
        let guideline = Guideline::Texas;
        // 1000 * 25 / 30
        assert_eq!(guideline.amount_for(dec!(1000.00), 3, 2, 0), dec!(833.33));
    }

    #[test]
    fn texas_clamps_large_families() {
        let guideline = Guideline::Texas;
        assert_eq!(guideline.amount_for(dec!(2000.00), 9, 8, 0), dec!(2000.00));
        assert_eq!(guideline.amount_for(dec!(2000.00), 9, 4, 12), dec!(1630.63));
    }

    #[test]
    fn table_falls_back_to_last_entry() {
        let guideline = Guideline::Table(vec![dec!(300), dec!(500)]);
        assert_eq!(guideline.amount_for(dec!(700), 3, 1, 0), dec!(300));
        assert_eq!(guideline.amount_for(dec!(700), 3, 3, 0), dec!(500));
    }

    #[test]
    fn flat_never_changes() {
        assert_eq!(Guideline::Flat.amount_for(dec!(450), 4, 1, 0), dec!(450));
    }

    #[test]
    fn guideline_deserializes_from_settings_json() {
        let texas: Guideline = serde_json::from_str(r#"{"kind":"texas"}"#).unwrap();
        assert_eq!(texas, Guideline::Texas);
        let table: Guideline =
            serde_json::from_str(r#"{"kind":"table","amounts":["100.00","150.00"]}"#).unwrap();
        assert_eq!(table, Guideline::Table(vec![dec!(100.00), dec!(150.00)]));
    }
}
