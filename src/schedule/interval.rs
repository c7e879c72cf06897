use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often an obligation falls due, identified by payments per year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "u32", into = "u32")]
pub enum PaymentInterval {
    #[default]
    Monthly,
    Semimonthly,
    BiWeekly,
    Weekly,
}

impl PaymentInterval {
    /// Maps a payments-per-year count onto an interval. Anything other than
    /// 12, 24, 26 or 52 is treated as monthly.
    pub fn from_payments_per_year(n_per_year: u32) -> Self {
        match n_per_year {
            12 => PaymentInterval::Monthly,
            24 => PaymentInterval::Semimonthly,
            26 => PaymentInterval::BiWeekly,
            52 => PaymentInterval::Weekly,
            other => {
                tracing::warn!(
                    payments_per_year = other,
                    "unsupported payment interval, defaulting to monthly"
                );
                PaymentInterval::Monthly
            }
        }
    }

    pub fn payments_per_year(&self) -> u32 {
        match self {
            PaymentInterval::Monthly => 12,
            PaymentInterval::Semimonthly => 24,
            PaymentInterval::BiWeekly => 26,
            PaymentInterval::Weekly => 52,
        }
    }

    /// Date the next payment falls due after `previous`.
    pub fn next_due_date(&self, previous: NaiveDate) -> NaiveDate {
        match self {
            PaymentInterval::Monthly => add_one_month(previous),
            PaymentInterval::BiWeekly => previous + Duration::weeks(2),
            PaymentInterval::Weekly => previous + Duration::weeks(1),
            PaymentInterval::Semimonthly => {
                if previous.day() < 15 {
                    previous + Duration::days(14)
                } else {
                    first_of_next_month(previous)
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentInterval::Monthly => "Monthly",
            PaymentInterval::Semimonthly => "Semimonthly",
            PaymentInterval::BiWeekly => "Bi-Weekly",
            PaymentInterval::Weekly => "Weekly",
        }
    }
}

impl From<u32> for PaymentInterval {
    fn from(n_per_year: u32) -> Self {
        PaymentInterval::from_payments_per_year(n_per_year)
    }
}

impl From<PaymentInterval> for u32 {
    fn from(interval: PaymentInterval) -> Self {
        interval.payments_per_year()
    }
}

/// Free-function form of [`PaymentInterval::next_due_date`] keyed by the raw
/// payments-per-year count.
pub fn next_due_date(previous: NaiveDate, payments_per_year: u32) -> NaiveDate {
    PaymentInterval::from_payments_per_year(payments_per_year).next_due_date(previous)
}

// Calendar-month step; the day clamps to the end of a shorter month.
fn add_one_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX)
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_keeps_day_of_month() {
        assert_eq!(next_due_date(ymd(2020, 1, 1), 12), ymd(2020, 2, 1));
        assert_eq!(next_due_date(ymd(2020, 12, 15), 12), ymd(2021, 1, 15));
    }

    #[test]
    fn monthly_clamps_short_months() {
        assert_eq!(next_due_date(ymd(2021, 1, 31), 12), ymd(2021, 2, 28));
        assert_eq!(next_due_date(ymd(2020, 1, 31), 12), ymd(2020, 2, 29));
        assert_eq!(next_due_date(ymd(2021, 2, 28), 12), ymd(2021, 3, 28));
    }

    #[test]
    fn weekly_and_biweekly_add_fixed_days() {
        assert_eq!(next_due_date(ymd(2020, 12, 28), 52), ymd(2021, 1, 4));
        assert_eq!(next_due_date(ymd(2020, 12, 28), 26), ymd(2021, 1, 11));
    }

    #[test]
    fn semimonthly_splits_on_the_fifteenth() {
        assert_eq!(next_due_date(ymd(2020, 3, 1), 24), ymd(2020, 3, 15));
        assert_eq!(next_due_date(ymd(2020, 3, 10), 24), ymd(2020, 3, 24));
        assert_eq!(next_due_date(ymd(2020, 3, 15), 24), ymd(2020, 4, 1));
        assert_eq!(next_due_date(ymd(2020, 3, 20), 24), ymd(2020, 4, 1));
        assert_eq!(next_due_date(ymd(2020, 12, 15), 24), ymd(2021, 1, 1));
    }

    #[test]
    fn unknown_frequency_defaults_to_monthly() {
        assert_eq!(PaymentInterval::from(7), PaymentInterval::Monthly);
        assert_eq!(next_due_date(ymd(2020, 5, 5), 0), ymd(2020, 6, 5));
    }

    #[test]
    fn serializes_as_payments_per_year() {
        let json = serde_json::to_string(&PaymentInterval::BiWeekly).unwrap();
        assert_eq!(json, "26");
        let parsed: PaymentInterval = serde_json::from_str("24").unwrap();
        assert_eq!(parsed, PaymentInterval::Semimonthly);
    }
}
