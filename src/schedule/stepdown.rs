use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::child::{AgeOutPolicy, Child, MajorityAge};
use super::guideline::{Guideline, PaymentGuideline};

/// One contiguous stretch of an order during which the amount is constant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepInterval {
    pub payment_amount: Decimal,
    /// Last day (inclusive) this amount applies. `None` never expires.
    pub effective_through_date: Option<NaiveDate>,
    /// Child whose age-out closes this interval.
    pub child_aging_out: Option<String>,
    /// Children still counted while this interval runs.
    pub active_children: usize,
}

impl StepInterval {
    pub fn covers(&self, date: NaiveDate) -> bool {
        match self.effective_through_date {
            Some(through) => date <= through,
            None => true,
        }
    }
}

/// Computes step-down timing with pluggable age-out and amount policies.
#[derive(Debug, Clone, Default)]
pub struct StepdownCalculator<A = MajorityAge, G = Guideline> {
    pub age_out: A,
    pub guideline: G,
}

impl StepdownCalculator {
    /// Eighteenth-birthday age-out with the Texas guideline percentages.
    pub fn standard() -> Self {
        Self::default()
    }
}

impl<A, G> StepdownCalculator<A, G>
where
    A: AgeOutPolicy,
    G: PaymentGuideline,
{
    pub fn new(age_out: A, guideline: G) -> Self {
        Self { age_out, guideline }
    }

    /// Builds the ordered step intervals for `children`, oldest age-out first.
    ///
    /// The `num_children_not_before_court` children that age out first are
    /// left out of the timing; they still select the guideline row.
    pub fn stepdown(
        &self,
        children: &[Child],
        initial_payment_amount: Decimal,
        num_children_not_before_court: usize,
    ) -> Vec<StepInterval> {
        let mut ordered: Vec<(NaiveDate, &Child)> = children
            .iter()
            .map(|child| (self.age_out.age_out_date(child), child))
            .collect();
        ordered.sort_by_key(|(age_out, _)| *age_out);

        let subject: Vec<(NaiveDate, &Child)> = ordered
            .into_iter()
            .skip(num_children_not_before_court)
            .collect();

        if subject.is_empty() {
            tracing::debug!(
                children = children.len(),
                num_children_not_before_court,
                "no children subject to step-down; single open-ended interval"
            );
            return vec![StepInterval {
                payment_amount: initial_payment_amount,
                effective_through_date: None,
                child_aging_out: None,
                active_children: 0,
            }];
        }

        let subject_count = subject.len();
        let intervals: Vec<StepInterval> = subject
            .iter()
            .enumerate()
            .map(|(idx, (age_out, child))| {
                let active_children = subject_count - idx;
                StepInterval {
                    payment_amount: self.guideline.amount_for(
                        initial_payment_amount,
                        subject_count,
                        active_children,
                        num_children_not_before_court,
                    ),
                    effective_through_date: Some(*age_out),
                    child_aging_out: Some(child.name.clone()),
                    active_children,
                }
            })
            .collect();

        tracing::debug!(intervals = intervals.len(), "computed step-down schedule");
        intervals
    }
}

/// Step-down schedule using an eighteenth-birthday age-out and the Texas
/// guideline percentages.
pub fn stepdown(
    children: &[Child],
    initial_payment_amount: Decimal,
    num_children_not_before_court: usize,
) -> Vec<StepInterval> {
    StepdownCalculator::standard().stepdown(
        children,
        initial_payment_amount,
        num_children_not_before_court,
    )
}
