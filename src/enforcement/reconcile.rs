use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payments::PaymentRecord;
use crate::schedule::{EntryType, ObligationKind, ScheduleEntry};

/// A scheduled obligation after payments have been applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReconciliationRow {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub note: String,
    pub paid_amount: Decimal,
    pub remaining_amount: Decimal,
    pub is_violation: bool,
    /// When the obligation was fully paid, if it was.
    pub satisfied_on: Option<NaiveDate>,
}

impl ReconciliationRow {
    fn from_entry(entry: &ScheduleEntry) -> Self {
        Self {
            entry_type: entry.entry_type,
            date: entry.date,
            description: entry.description.clone(),
            amount: entry.amount,
            note: entry.note.clone(),
            paid_amount: Decimal::ZERO,
            remaining_amount: entry.amount,
            is_violation: false,
            satisfied_on: None,
        }
    }

    fn apply(&mut self, credit: &mut Decimal, on: NaiveDate) {
        let applied = (*credit).min(self.remaining_amount);
        if applied <= Decimal::ZERO {
            return;
        }
        self.paid_amount += applied;
        self.remaining_amount -= applied;
        *credit -= applied;
        if self.remaining_amount.is_zero() {
            self.satisfied_on = Some(on.max(self.date));
        }
    }
}

/// Output of [`reconcile`]: one row per scheduled obligation plus any money
/// that could not be applied, by stream description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reconciliation {
    pub rows: Vec<ReconciliationRow>,
    pub unapplied: Vec<(String, Decimal)>,
}

impl Reconciliation {
    fn add_unapplied(&mut self, description: &str, amount: Decimal) {
        match self
            .unapplied
            .iter_mut()
            .find(|(name, _)| name == description)
        {
            Some((_, total)) => *total += amount,
            None => self.unapplied.push((description.to_string(), amount)),
        }
    }
}

/// Applies `payments` to `payments_due` oldest-obligation-first.
///
/// Every stream (description) is reconciled on its own. A payment goes to the
/// stream its memo names, or to child support when no such stream exists.
/// Within a stream a payment only reaches obligations due on or before its
/// date; what is left over is credit for the next obligation that falls due.
/// Rows come back in the order of `payments_due`.
pub fn reconcile(payments_due: &[ScheduleEntry], payments: &[PaymentRecord]) -> Reconciliation {
    let mut result = Reconciliation {
        rows: payments_due.iter().map(ReconciliationRow::from_entry).collect(),
        unapplied: Vec::new(),
    };

    let mut streams: Vec<(&str, Vec<usize>)> = Vec::new();
    for (idx, entry) in payments_due.iter().enumerate() {
        match streams
            .iter_mut()
            .find(|(description, _)| *description == entry.description)
        {
            Some((_, indices)) => indices.push(idx),
            None => streams.push((entry.description.as_str(), vec![idx])),
        }
    }
    for (_, indices) in &mut streams {
        indices.sort_by_key(|&idx| payments_due[idx].date);
    }

    let mut pools: Vec<Vec<&PaymentRecord>> = vec![Vec::new(); streams.len()];
    for payment in payments {
        match route(payment.kind(), &streams) {
            Some(stream) => pools[stream].push(payment),
            None => {
                let stream = payment.kind().description();
                tracing::warn!(amount = %payment.amount, stream, "no stream for payment");
                result.add_unapplied(stream, payment.amount);
            }
        }
    }

    for ((description, indices), mut pool) in streams.iter().zip(pools) {
        pool.sort_by_key(|payment| payment.date);
        let leftover = apply_pool(&mut result.rows, indices, &pool);
        if leftover > Decimal::ZERO {
            tracing::warn!(stream = *description, %leftover, "payments exceed amounts owed");
            result.add_unapplied(description, leftover);
        }
    }

    for row in &mut result.rows {
        row.is_violation = row.remaining_amount > Decimal::ZERO;
    }

    tracing::debug!(
        rows = result.rows.len(),
        payments = payments.len(),
        violations = result.rows.iter().filter(|row| row.is_violation).count(),
        "reconciled payments"
    );

    result
}

/// Reconciliation rows only; see [`reconcile`].
pub fn enforcement_report(
    payments_due: &[ScheduleEntry],
    payments: &[PaymentRecord],
) -> Vec<ReconciliationRow> {
    reconcile(payments_due, payments).rows
}

// Picks the stream for a payment: the kind's standard description, then any
// stream of that kind, then the same search for child support.
fn route(kind: ObligationKind, streams: &[(&str, Vec<usize>)]) -> Option<usize> {
    let find = |kind: ObligationKind| {
        streams
            .iter()
            .position(|(description, _)| *description == kind.description())
            .or_else(|| {
                streams
                    .iter()
                    .position(|(description, _)| ObligationKind::classify(description) == kind)
            })
    };
    find(kind).or_else(|| find(ObligationKind::ChildSupport))
}

// Walks one stream's obligations in due order, returning unused credit.
fn apply_pool(
    rows: &mut [ReconciliationRow],
    indices: &[usize],
    payments: &[&PaymentRecord],
) -> Decimal {
    let mut credit = Decimal::ZERO;
    let mut cursor = 0;

    for payment in payments {
        // Credit carried from earlier payments clears entries as they fall due.
        apply_credit(rows, indices, &mut cursor, &mut credit, payment.date, None);
        credit += payment.amount;
        apply_credit(rows, indices, &mut cursor, &mut credit, payment.date, Some(payment.date));
    }
    apply_credit(rows, indices, &mut cursor, &mut credit, NaiveDate::MAX, None);

    credit
}

// Applies credit to rows due on or before `through`. Rows are stamped with
// `paid_on`, or with their own due date when `paid_on` is `None`.
fn apply_credit(
    rows: &mut [ReconciliationRow],
    indices: &[usize],
    cursor: &mut usize,
    credit: &mut Decimal,
    through: NaiveDate,
    paid_on: Option<NaiveDate>,
) {
    while *cursor < indices.len() && *credit > Decimal::ZERO {
        let row = &mut rows[indices[*cursor]];
        if row.date > through {
            break;
        }
        let on = paid_on.unwrap_or(row.date);
        row.apply(credit, on);
        if row.remaining_amount <= Decimal::ZERO {
            *cursor += 1;
        }
    }
}
