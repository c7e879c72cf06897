//! Intake of a client's enforcement case as entered on the web form.

use std::{fs, path::Path};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enforcement::{parse_payments, PaymentLedger};
use crate::errors::{EnforcementError, FieldError, Result, ValidationErrors};
use crate::schedule::{Child, CombinedPlan, PaymentInterval};
use crate::utils::parse_flexible_date;

/// A child as stored on the client record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildRecord {
    pub name: String,
    #[serde(default)]
    pub dob: Option<String>,
}

/// Raw enforcement inputs. Amounts stay text until [`CaseFile::plan`]
/// validates them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CaseFile {
    pub children: Vec<ChildRecord>,
    pub cs_payment_amount: String,
    pub medical_payment_amount: String,
    pub dental_payment_amount: String,
    pub confirmed_arrearage: Option<String>,
    pub start_date: String,
    pub children_not_before_court: Option<String>,
    pub payment_interval: Option<u32>,
    pub payments: String,
}

impl CaseFile {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Validates the case into a typed plan.
    ///
    /// A bad child record fails immediately. Amount, count and date problems
    /// are collected and returned together.
    pub fn plan(&self, default_interval: PaymentInterval) -> Result<CombinedPlan> {
        let children = self
            .children
            .iter()
            .map(|record| Child::parse(&record.name, record.dob.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        let mut errors = ValidationErrors::default();
        let child_support = collect(
            &mut errors,
            parse_dollars("cs_payment_amount", &self.cs_payment_amount),
        );
        let health_insurance = collect(
            &mut errors,
            parse_dollars("medical_payment_amount", &self.medical_payment_amount),
        );
        let dental_insurance = collect(
            &mut errors,
            parse_dollars("dental_payment_amount", &self.dental_payment_amount),
        );
        let confirmed_arrearage = match &self.confirmed_arrearage {
            Some(raw) if !raw.trim().is_empty() => {
                collect(&mut errors, parse_dollars("confirmed_arrearage", raw))
            }
            _ => None,
        };
        let num_children_not_before_court = collect(
            &mut errors,
            parse_count(
                "children_not_before_court",
                self.children_not_before_court.as_deref().unwrap_or(""),
            ),
        );
        let start_date = collect(&mut errors, parse_start_date(&self.start_date));

        errors.into_result()?;

        match (
            child_support,
            health_insurance,
            dental_insurance,
            num_children_not_before_court,
            start_date,
        ) {
            (Some(cs), Some(medical), Some(dental), Some(not_before_court), Some(start)) => {
                Ok(CombinedPlan {
                    children,
                    child_support: cs,
                    health_insurance: medical,
                    dental_insurance: dental,
                    confirmed_arrearage: confirmed_arrearage.filter(|a| *a > Decimal::ZERO),
                    start_date: start,
                    num_children_not_before_court: not_before_court,
                    payment_interval: self
                        .payment_interval
                        .map(PaymentInterval::from)
                        .unwrap_or(default_interval),
                })
            }
            _ => Err(EnforcementError::Config("case validation produced no values".into())),
        }
    }

    /// Payment log with any unreadable lines reported alongside.
    pub fn payment_ledger(&self) -> PaymentLedger {
        parse_payments(&self.payments)
    }
}

/// Cleans a typed dollar value: `$` and `,` are dropped, blank means zero,
/// negatives are refused.
pub fn parse_dollars(field: &str, raw: &str) -> std::result::Result<Decimal, FieldError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value: Decimal = cleaned
        .parse()
        .map_err(|_| FieldError::new(field, "Please enter a dollar value."))?;
    if value < Decimal::ZERO {
        return Err(FieldError::new(field, "Value cannot be a negative number."));
    }
    Ok(value)
}

fn parse_count(field: &str, raw: &str) -> std::result::Result<usize, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| FieldError::new(field, "Please enter a whole number."))
}

fn parse_start_date(raw: &str) -> std::result::Result<NaiveDate, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::new("start_date", "First payment due date is required."));
    }
    parse_flexible_date(raw).ok_or_else(|| {
        FieldError::new("start_date", format!("`{}` is not a valid date.", raw.trim()))
    })
}

fn collect<T>(
    errors: &mut ValidationErrors,
    result: std::result::Result<T, FieldError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}
