use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::reconcile::ReconciliationRow;

/// Label used for the grand total in arrearage summaries.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Obligations left with an unpaid balance.
pub fn violations(report: &[ReconciliationRow]) -> Vec<ReconciliationRow> {
    report
        .iter()
        .filter(|row| row.remaining_amount > Decimal::ZERO)
        .cloned()
        .collect()
}

/// Unpaid balances per obligation stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArrearageSummary {
    /// Streams in order of their first unpaid obligation.
    pub by_description: Vec<(String, Decimal)>,
    pub total: Decimal,
}

impl ArrearageSummary {
    pub fn get(&self, description: &str) -> Option<Decimal> {
        self.by_description
            .iter()
            .find(|(name, _)| name == description)
            .map(|(_, amount)| *amount)
    }
}

/// Adds up the unpaid balance of every violating row, per stream and overall.
pub fn arrearage_totals(report: &[ReconciliationRow]) -> ArrearageSummary {
    let mut summary = ArrearageSummary::default();
    for row in report.iter().filter(|row| row.remaining_amount > Decimal::ZERO) {
        match summary
            .by_description
            .iter_mut()
            .find(|(name, _)| *name == row.description)
        {
            Some((_, amount)) => *amount += row.remaining_amount,
            None => summary
                .by_description
                .push((row.description.clone(), row.remaining_amount)),
        }
        summary.total += row.remaining_amount;
    }
    summary
}
