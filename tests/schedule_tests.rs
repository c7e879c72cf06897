use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use support_enforcement::schedule::{
    combined_payment_schedule, payment_schedule, stepdown, Child, CombinedPlan, Guideline,
    MajorityAge, PaymentInterval, StepdownCalculator, ARREARAGE_DESCRIPTION,
    CHILD_SUPPORT_DESCRIPTION, DENTAL_SUPPORT_DESCRIPTION, MEDICAL_SUPPORT_DESCRIPTION,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn three_children() -> Vec<Child> {
    vec![
        Child::new("Middle", ymd(2008, 6, 15)),
        Child::new("Youngest", ymd(2012, 3, 1)),
        Child::new("Oldest", ymd(2004, 9, 30)),
    ]
}

#[test]
fn single_child_monthly_until_as_of() {
    let children = vec![Child::new("Kid", ymd(2010, 1, 1))];
    let steps = stepdown(&children, dec!(1000.00), 0);
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].effective_through_date, Some(ymd(2028, 1, 1)));
    assert_eq!(steps[0].payment_amount, dec!(1000.00));

    let schedule = payment_schedule(
        dec!(1000.00),
        PaymentInterval::Monthly,
        ymd(2020, 1, 1),
        &steps,
        CHILD_SUPPORT_DESCRIPTION,
        false,
        ymd(2020, 4, 1),
    );
    let dates: Vec<_> = schedule.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![ymd(2020, 1, 1), ymd(2020, 2, 1), ymd(2020, 3, 1)]);
    assert!(schedule
        .iter()
        .all(|e| e.amount == dec!(1000.00) && e.remaining_amount == e.amount));
}

#[test]
fn stepdown_through_dates_strictly_increase() {
    let steps = stepdown(&three_children(), dec!(1500), 0);
    assert_eq!(steps.len(), 3);
    let names: Vec<_> = steps
        .iter()
        .map(|s| s.child_aging_out.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["Oldest", "Middle", "Youngest"]);
    assert!(steps
        .windows(2)
        .all(|pair| pair[0].effective_through_date < pair[1].effective_through_date));
    let active: Vec<_> = steps.iter().map(|s| s.active_children).collect();
    assert_eq!(active, vec![3, 2, 1]);
}

#[test]
fn children_not_before_court_shorten_the_stepdown() {
    let steps = stepdown(&three_children(), dec!(1500), 1);
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].child_aging_out.as_deref(), Some("Middle"));

    let none_left = stepdown(&three_children(), dec!(1500), 3);
    assert_eq!(none_left.len(), 1);
    assert_eq!(none_left[0].effective_through_date, None);
    assert_eq!(none_left[0].payment_amount, dec!(1500));
}

#[test]
fn amounts_track_the_active_interval() {
    let children = vec![
        Child::new("Ann", ymd(2002, 3, 10)),
        Child::new("Ben", ymd(2005, 7, 4)),
    ];
    let steps = stepdown(&children, dec!(1000), 0);
    assert_eq!(steps[1].payment_amount, dec!(800.00));

    let schedule = payment_schedule(
        dec!(1000),
        PaymentInterval::Monthly,
        ymd(2020, 1, 1),
        &steps,
        CHILD_SUPPORT_DESCRIPTION,
        false,
        ymd(2024, 1, 1),
    );

    for entry in &schedule {
        let step = steps.iter().find(|s| s.covers(entry.date)).unwrap();
        assert_eq!(entry.amount, step.payment_amount);
    }
    let first_lower = schedule
        .iter()
        .position(|e| e.amount == dec!(800.00))
        .unwrap();
    assert_eq!(schedule[first_lower].date, ymd(2020, 4, 1));
    assert_eq!(schedule[first_lower].note, "Ann aged out.");
    assert!(schedule
        .iter()
        .enumerate()
        .all(|(idx, e)| idx == first_lower || e.note.is_empty()));
    let last = schedule.last().unwrap();
    assert_eq!(last.date, ymd(2023, 7, 1));
    assert!(schedule.windows(2).all(|pair| pair[0].date < pair[1].date));
}

#[test]
fn schedule_is_reusable_across_calls() {
    let steps = stepdown(&three_children(), dec!(900), 0);
    let first = payment_schedule(
        dec!(900),
        PaymentInterval::BiWeekly,
        ymd(2021, 1, 4),
        &steps,
        CHILD_SUPPORT_DESCRIPTION,
        false,
        ymd(2023, 1, 1),
    );
    let second = payment_schedule(
        dec!(900),
        PaymentInterval::BiWeekly,
        ymd(2021, 1, 4),
        &steps,
        CHILD_SUPPORT_DESCRIPTION,
        false,
        ymd(2023, 1, 1),
    );
    assert_eq!(first, second);
    assert_eq!(steps.len(), 3);
}

#[test]
fn semimonthly_boundary() {
    assert_eq!(
        PaymentInterval::Semimonthly.next_due_date(ymd(2020, 1, 20)),
        ymd(2020, 2, 1)
    );
    assert_eq!(
        PaymentInterval::Semimonthly.next_due_date(ymd(2020, 1, 10)),
        ymd(2020, 1, 24)
    );
    assert_eq!(
        PaymentInterval::from(24).next_due_date(ymd(2020, 12, 15)),
        ymd(2021, 1, 1)
    );
}

#[test]
fn unknown_frequency_is_monthly() {
    assert_eq!(PaymentInterval::from(7), PaymentInterval::Monthly);
    assert_eq!(
        PaymentInterval::from(365).next_due_date(ymd(2021, 1, 31)),
        ymd(2021, 2, 28)
    );
}

#[test]
fn combined_schedule_merges_streams() {
    let plan = CombinedPlan {
        children: vec![Child::new("Kid", ymd(2010, 1, 1))],
        child_support: dec!(1000),
        health_insurance: dec!(150),
        dental_insurance: Decimal::ZERO,
        confirmed_arrearage: Some(dec!(2500)),
        start_date: ymd(2020, 1, 1),
        num_children_not_before_court: 0,
        payment_interval: PaymentInterval::Monthly,
    };
    let schedule =
        combined_payment_schedule(&plan, &StepdownCalculator::standard(), ymd(2020, 3, 1));
    let summary: Vec<_> = schedule
        .iter()
        .map(|e| (e.date, e.description.as_str(), e.amount))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ymd(2020, 1, 1), ARREARAGE_DESCRIPTION, dec!(2500)),
            (ymd(2020, 1, 1), CHILD_SUPPORT_DESCRIPTION, dec!(1000)),
            (ymd(2020, 1, 1), MEDICAL_SUPPORT_DESCRIPTION, dec!(150)),
            (ymd(2020, 2, 1), CHILD_SUPPORT_DESCRIPTION, dec!(1000)),
            (ymd(2020, 2, 1), MEDICAL_SUPPORT_DESCRIPTION, dec!(150)),
        ]
    );
    assert!(schedule
        .iter()
        .all(|e| e.description != DENTAL_SUPPORT_DESCRIPTION));
}

#[test]
fn custom_policies_drive_the_stepdown() {
    let calculator = StepdownCalculator::new(
        MajorityAge { years: 19 },
        Guideline::Table(vec![dec!(400), dec!(700)]),
    );
    let children = vec![
        Child::new("Ann", ymd(2001, 5, 5)),
        Child::new("Ben", ymd(2003, 5, 5)),
    ];
    let steps = calculator.stepdown(&children, dec!(700), 0);
    assert_eq!(steps[0].effective_through_date, Some(ymd(2020, 5, 5)));
    assert_eq!(steps[0].payment_amount, dec!(700));
    assert_eq!(steps[1].payment_amount, dec!(400));
}
