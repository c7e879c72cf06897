use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{EnforcementError, Result};
use crate::utils::parse_flexible_date;

/// A child counted by a support order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Child {
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl Child {
    pub fn new(name: impl Into<String>, date_of_birth: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date_of_birth,
        }
    }

    /// Builds a child from raw intake text, rejecting records whose name or
    /// date of birth cannot be used for step-down timing.
    pub fn parse(name: &str, date_of_birth: Option<&str>) -> Result<Self> {
        let name = name.trim();
        let label = if name.is_empty() { "<unnamed>" } else { name };
        if name.is_empty() {
            return Err(EnforcementError::InvalidChild {
                name: label.into(),
                reason: "name is required".into(),
            });
        }
        let raw = match date_of_birth.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                return Err(EnforcementError::InvalidChild {
                    name: label.into(),
                    reason: "date of birth is required".into(),
                })
            }
        };
        let dob = parse_flexible_date(raw).ok_or_else(|| EnforcementError::InvalidChild {
            name: label.into(),
            reason: format!("`{raw}` is not a valid date of birth"),
        })?;
        Ok(Self::new(name, dob))
    }
}

/// Decides when a child stops being counted by the order.
pub trait AgeOutPolicy {
    fn age_out_date(&self, child: &Child) -> NaiveDate;
}

/// Ages a child out on a fixed birthday. A February 29 birthday lands on
/// February 28 in non-leap years.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MajorityAge {
    pub years: u32,
}

impl Default for MajorityAge {
    fn default() -> Self {
        Self { years: 18 }
    }
}

impl AgeOutPolicy for MajorityAge {
    fn age_out_date(&self, child: &Child) -> NaiveDate {
        child
            .date_of_birth
            .checked_add_months(Months::new(self.years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl<F> AgeOutPolicy for F
where
    F: Fn(&Child) -> NaiveDate,
{
    fn age_out_date(&self, child: &Child) -> NaiveDate {
        self(child)
    }
}
