use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::interval::PaymentInterval;
use super::stepdown::StepInterval;

const MAX_SCHEDULE_ENTRIES: usize = 10_000;

/// Kind of line in a schedule or compliance ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryType {
    #[serde(rename = "A")]
    AmountDue,
    #[serde(rename = "P")]
    Payment,
}

impl EntryType {
    pub fn code(&self) -> &'static str {
        match self {
            EntryType::AmountDue => "A",
            EntryType::Payment => "P",
        }
    }
}

/// One obligation that has fallen due.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub note: String,
    pub remaining_amount: Decimal,
}

impl ScheduleEntry {
    pub fn due(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Self {
        Self {
            entry_type: EntryType::AmountDue,
            date,
            description: description.into(),
            amount,
            note: note.into(),
            remaining_amount: amount,
        }
    }
}

/// Lists every payment that fell due from `start_date` up to (not including)
/// `as_of`.
///
/// Each due date takes its amount from the step interval covering it, or
/// `initial_amount` when `fixed_payment` is set. The first entry after a
/// step-down notes which child aged out. The schedule ends when the last
/// interval expires.
pub fn payment_schedule(
    initial_amount: Decimal,
    interval: PaymentInterval,
    start_date: NaiveDate,
    step_down_schedule: &[StepInterval],
    description: &str,
    fixed_payment: bool,
    as_of: NaiveDate,
) -> Vec<ScheduleEntry> {
    let mut schedule = Vec::new();
    let mut due_date = start_date;
    let mut note = String::new();

    'steps: for step in step_down_schedule {
        let amount = if fixed_payment {
            initial_amount
        } else {
            step.payment_amount
        };

        while step.covers(due_date) {
            if due_date >= as_of {
                break 'steps;
            }
            if schedule.len() >= MAX_SCHEDULE_ENTRIES {
                tracing::warn!(
                    description,
                    limit = MAX_SCHEDULE_ENTRIES,
                    "payment schedule truncated"
                );
                break 'steps;
            }
            schedule.push(ScheduleEntry::due(
                due_date,
                description,
                amount,
                std::mem::take(&mut note),
            ));
            due_date = interval.next_due_date(due_date);
        }

        if let Some(name) = &step.child_aging_out {
            if !note.is_empty() {
                note.push(' ');
            }
            note.push_str(&format!("{name} aged out."));
        }
    }

    tracing::debug!(
        description,
        entries = schedule.len(),
        payments_per_year = interval.payments_per_year(),
        "generated payment schedule"
    );
    schedule
}
