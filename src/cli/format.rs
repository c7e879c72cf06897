use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;

use super::table::{Table, TableColumn};
use crate::enforcement::{ArrearageSummary, ComplianceLine, ReconciliationRow, TOTAL_LABEL};
use crate::schedule::{ScheduleEntry, StepInterval};

const DESCRIPTION_WIDTH: usize = 32;
const NOTE_WIDTH: usize = 40;

/// Renders an amount as US dollars, e.g. `$1,234.56` or `-$50.00`.
pub fn format_dollars(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn stepdown_table(steps: &[StepInterval]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Through"),
        TableColumn::right("Children"),
        TableColumn::right("Amount"),
        TableColumn::left("Aging out"),
    ]);
    for step in steps {
        table.push_row(vec![
            step.effective_through_date
                .map(format_date)
                .unwrap_or_else(|| "open-ended".to_string()),
            step.active_children.to_string(),
            format_dollars(step.payment_amount),
            step.child_aging_out.clone().unwrap_or_default(),
        ]);
    }
    table
}

pub fn schedule_table(entries: &[ScheduleEntry]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Type"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
        TableColumn::right("Amount"),
        TableColumn::left("Note").max_width(NOTE_WIDTH),
    ]);
    for entry in entries {
        table.push_row(vec![
            entry.entry_type.code().to_string(),
            format_date(entry.date),
            entry.description.clone(),
            format_dollars(entry.amount),
            entry.note.clone(),
        ]);
    }
    table
}

pub fn reconciliation_table(rows: &[ReconciliationRow]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
        TableColumn::right("Amount"),
        TableColumn::right("Paid"),
        TableColumn::right("Remaining"),
        TableColumn::left("Satisfied"),
    ]);
    for row in rows {
        let remaining = format_dollars(row.remaining_amount);
        table.push_row(vec![
            format_date(row.date),
            row.description.clone(),
            format_dollars(row.amount),
            format_dollars(row.paid_amount),
            if row.is_violation {
                remaining.red().to_string()
            } else {
                remaining
            },
            row.satisfied_on.map(format_date).unwrap_or_default(),
        ]);
    }
    table
}

pub fn arrearage_table(summary: &ArrearageSummary) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Obligation"),
        TableColumn::right("Arrearage"),
    ]);
    for (description, amount) in &summary.by_description {
        table.push_row(vec![description.clone(), format_dollars(*amount)]);
    }
    table.push_row(vec![
        TOTAL_LABEL.bold().to_string(),
        format_dollars(summary.total).bold().to_string(),
    ]);
    table
}

pub fn compliance_table(lines: &[ComplianceLine]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Type"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
        TableColumn::right("Amount"),
        TableColumn::right("Balance"),
    ]);
    for line in lines {
        table.push_row(vec![
            line.entry_type.code().to_string(),
            format_date(line.date),
            line.description.clone(),
            format_dollars(line.amount),
            format_dollars(line.balance),
        ]);
    }
    table
}
