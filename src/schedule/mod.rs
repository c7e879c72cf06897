//! Obligation timing: payment intervals, step-downs, and due schedules.

pub mod child;
pub mod combined;
pub mod guideline;
pub mod interval;
pub mod obligation;
pub mod payment_schedule;
pub mod stepdown;

pub use child::{AgeOutPolicy, Child, MajorityAge};
pub use combined::{combined_payment_schedule, CombinedPlan};
pub use guideline::{Guideline, PaymentGuideline};
pub use interval::{next_due_date, PaymentInterval};
pub use obligation::{
    ObligationKind, ARREARAGE_DESCRIPTION, CHILD_SUPPORT_DESCRIPTION, DENTAL_SUPPORT_DESCRIPTION,
    MEDICAL_SUPPORT_DESCRIPTION,
};
pub use payment_schedule::{payment_schedule, EntryType, ScheduleEntry};
pub use stepdown::{stepdown, StepInterval, StepdownCalculator};
