use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payments::PaymentRecord;
use crate::schedule::{EntryType, ScheduleEntry};

const PAYMENT_DESCRIPTION: &str = "Payment received";

/// One line of the running account between obligor and obligee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceLine {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    /// Total owed after this line; negative when the obligor is ahead.
    pub balance: Decimal,
}

/// Interleaves amounts due and payments received by date with a running
/// balance. On a shared date the obligations come first.
pub fn compliance_report(
    payments_due: &[ScheduleEntry],
    payments: &[PaymentRecord],
) -> Vec<ComplianceLine> {
    let mut events: Vec<(NaiveDate, u8, usize)> =
        Vec::with_capacity(payments_due.len() + payments.len());
    events.extend(payments_due.iter().enumerate().map(|(idx, e)| (e.date, 0, idx)));
    events.extend(payments.iter().enumerate().map(|(idx, p)| (p.date, 1, idx)));
    events.sort();

    let mut balance = Decimal::ZERO;
    events
        .into_iter()
        .map(|(date, source, idx)| {
            if source == 0 {
                let entry = &payments_due[idx];
                balance += entry.amount;
                ComplianceLine {
                    entry_type: EntryType::AmountDue,
                    date,
                    description: entry.description.clone(),
                    amount: entry.amount,
                    balance,
                }
            } else {
                let payment = &payments[idx];
                balance -= payment.amount;
                let description = if payment.memo.is_empty() {
                    PAYMENT_DESCRIPTION.to_string()
                } else {
                    format!("{PAYMENT_DESCRIPTION} ({})", payment.memo)
                };
                ComplianceLine {
                    entry_type: EntryType::Payment,
                    date,
                    description,
                    amount: payment.amount,
                    balance,
                }
            }
        })
        .collect()
}
