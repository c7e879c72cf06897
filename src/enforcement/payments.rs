use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::ObligationKind;
use crate::utils::parse_flexible_date;

static PAYMENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<date>\d{4}-\d{1,2}-\d{1,2}|\d{1,2}/\d{1,2}/\d{2,4})[\s,;|]+\$?\s*(?P<amount>\d[\d,]*(?:\.\d+)?|\.\d+)(?:[\s,;|]+(?P<memo>.*))?$",
    )
    .expect("payment line pattern is valid")
});

/// A payment the obligor actually made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRecord {
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub raw_line: String,
}

impl PaymentRecord {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            date,
            amount,
            memo: String::new(),
            raw_line: String::new(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Obligation stream the memo points this payment at.
    pub fn kind(&self) -> ObligationKind {
        ObligationKind::classify(&self.memo)
    }
}

/// A non-blank line the parser could not use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseWarning {
    pub line_number: usize,
    pub line: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentLedger {
    pub payments: Vec<PaymentRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Parses a user-typed payment log, one `date amount [memo]` per line.
///
/// Blank lines are ignored. Lines that cannot be read are skipped and
/// reported in `warnings`; records keep their input order.
pub fn parse_payments(raw_text: &str) -> PaymentLedger {
    let mut ledger = PaymentLedger::default();

    for (idx, line) in raw_text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_line(trimmed) {
            Ok(record) => ledger.payments.push(record),
            Err(reason) => ledger.warnings.push(ParseWarning {
                line_number: idx + 1,
                line: trimmed.to_string(),
                reason,
            }),
        }
    }

    ledger
}

/// Parses a payment log and keeps only the usable records.
pub fn payments_made(raw_text: &str) -> Vec<PaymentRecord> {
    let ledger = parse_payments(raw_text);
    for warning in &ledger.warnings {
        tracing::debug!(
            line_number = warning.line_number,
            line = %warning.line,
            reason = %warning.reason,
            "skipped payment line"
        );
    }
    ledger.payments
}

fn parse_line(line: &str) -> Result<PaymentRecord, String> {
    let caps = PAYMENT_LINE
        .captures(line)
        .ok_or_else(|| "expected a date followed by an amount".to_string())?;

    let raw_date = &caps["date"];
    let date =
        parse_flexible_date(raw_date).ok_or_else(|| format!("`{raw_date}` is not a valid date"))?;

    let raw_amount = &caps["amount"];
    let mut cleaned = raw_amount.replace(',', "");
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    let amount: Decimal = cleaned
        .parse()
        .map_err(|_| format!("`{raw_amount}` is not a dollar amount"))?;
    if amount.is_zero() {
        return Err("payment amount is zero".into());
    }

    let memo = caps
        .name("memo")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Ok(PaymentRecord {
        date,
        amount,
        memo,
        raw_line: line.to_string(),
    })
}
