use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::child::{AgeOutPolicy, Child};
use super::guideline::PaymentGuideline;
use super::interval::PaymentInterval;
use super::obligation::{
    ARREARAGE_DESCRIPTION, CHILD_SUPPORT_DESCRIPTION, DENTAL_SUPPORT_DESCRIPTION,
    MEDICAL_SUPPORT_DESCRIPTION,
};
use super::payment_schedule::{payment_schedule, ScheduleEntry};
use super::stepdown::StepdownCalculator;

/// Everything needed to lay out the obligations of one support order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombinedPlan {
    pub children: Vec<Child>,
    pub child_support: Decimal,
    pub health_insurance: Decimal,
    pub dental_insurance: Decimal,
    pub confirmed_arrearage: Option<Decimal>,
    pub start_date: NaiveDate,
    pub num_children_not_before_court: usize,
    pub payment_interval: PaymentInterval,
}

/// Merges the child-support, medical and dental streams (plus any confirmed
/// arrearage) into one date-ordered list of amounts owed as of `as_of`.
///
/// Streams keep their own descriptions. Entries on the same date stay in
/// stream order: arrearage, child support, medical, dental.
pub fn combined_payment_schedule<A, G>(
    plan: &CombinedPlan,
    calculator: &StepdownCalculator<A, G>,
    as_of: NaiveDate,
) -> Vec<ScheduleEntry>
where
    A: AgeOutPolicy,
    G: PaymentGuideline,
{
    let steps = calculator.stepdown(
        &plan.children,
        plan.child_support,
        plan.num_children_not_before_court,
    );

    let mut combined = Vec::new();

    if let Some(arrearage) = plan.confirmed_arrearage {
        if arrearage > Decimal::ZERO && plan.start_date < as_of {
            combined.push(ScheduleEntry::due(
                plan.start_date,
                ARREARAGE_DESCRIPTION,
                arrearage,
                "",
            ));
        }
    }

    let streams = [
        (plan.child_support, CHILD_SUPPORT_DESCRIPTION, false),
        (plan.health_insurance, MEDICAL_SUPPORT_DESCRIPTION, true),
        (plan.dental_insurance, DENTAL_SUPPORT_DESCRIPTION, true),
    ];
    for (amount, description, fixed_payment) in streams {
        if amount <= Decimal::ZERO {
            continue;
        }
        combined.extend(payment_schedule(
            amount,
            plan.payment_interval,
            plan.start_date,
            &steps,
            description,
            fixed_payment,
            as_of,
        ));
    }

    combined.sort_by_key(|entry| entry.date);
    tracing::debug!(entries = combined.len(), "combined payment schedule");
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan() -> CombinedPlan {
        CombinedPlan {
            children: vec![
                Child::new("Ava", ymd(2002, 2, 15)),
                Child::new("Tom", ymd(2005, 1, 29)),
            ],
            child_support: dec!(1000.00),
            health_insurance: dec!(200.00),
            dental_insurance: dec!(0.00),
            confirmed_arrearage: None,
            start_date: ymd(2020, 1, 1),
            num_children_not_before_court: 0,
            payment_interval: PaymentInterval::Monthly,
        }
    }

    #[test]
    fn interleaves_streams_by_date() {
        let calculator = StepdownCalculator::standard();
        let schedule = combined_payment_schedule(&plan(), &calculator, ymd(2020, 3, 1));
        let described: Vec<_> = schedule
            .iter()
            .map(|e| (e.date, e.description.as_str()))
            .collect();
        assert_eq!(
            described,
            vec![
                (ymd(2020, 1, 1), CHILD_SUPPORT_DESCRIPTION),
                (ymd(2020, 1, 1), MEDICAL_SUPPORT_DESCRIPTION),
                (ymd(2020, 2, 1), CHILD_SUPPORT_DESCRIPTION),
                (ymd(2020, 2, 1), MEDICAL_SUPPORT_DESCRIPTION),
            ]
        );
    }

    #[test]
    fn insurance_does_not_step_down() {
        let calculator = StepdownCalculator::standard();
        let schedule = combined_payment_schedule(&plan(), &calculator, ymd(2020, 4, 1));
        let march: Vec<_> = schedule
            .iter()
            .filter(|e| e.date == ymd(2020, 3, 1))
            .collect();
        assert_eq!(march[0].amount, dec!(800.00));
        assert_eq!(march[0].note, "Ava aged out.");
        assert_eq!(march[1].amount, dec!(200.00));
        assert_eq!(march[1].note, "Ava aged out.");
    }

    #[test]
    fn arrearage_is_due_on_start_date() {
        let mut plan = plan();
        plan.confirmed_arrearage = Some(dec!(4321.09));
        let calculator = StepdownCalculator::standard();
        let schedule = combined_payment_schedule(&plan, &calculator, ymd(2020, 1, 2));
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].description, ARREARAGE_DESCRIPTION);
        assert_eq!(schedule[0].amount, dec!(4321.09));
    }

    #[test]
    fn zero_streams_are_omitted() {
        let mut plan = plan();
        plan.health_insurance = Decimal::ZERO;
        let calculator = StepdownCalculator::standard();
        let schedule = combined_payment_schedule(&plan, &calculator, ymd(2020, 6, 1));
        assert!(schedule.iter().all(|e| e.description == CHILD_SUPPORT_DESCRIPTION));
    }
}
