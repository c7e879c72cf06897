use serde::{Deserialize, Serialize};

pub const ARREARAGE_DESCRIPTION: &str = "Confirmed arrearage due";
pub const CHILD_SUPPORT_DESCRIPTION: &str = "Child support payment due";
pub const MEDICAL_SUPPORT_DESCRIPTION: &str = "Medical support payment due";
pub const DENTAL_SUPPORT_DESCRIPTION: &str = "Dental support payment due";

/// Category of obligation a schedule stream or payment belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    Arrearage,
    ChildSupport,
    MedicalSupport,
    DentalSupport,
}

impl ObligationKind {
    /// Classifies a stream description or payment memo by keyword. Text that
    /// names nothing in particular is child support.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_ascii_lowercase();
        if lowered.contains("dental") {
            ObligationKind::DentalSupport
        } else if ["medical", "health", "insurance"]
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            ObligationKind::MedicalSupport
        } else if lowered.contains("arrear") {
            ObligationKind::Arrearage
        } else {
            ObligationKind::ChildSupport
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ObligationKind::Arrearage => ARREARAGE_DESCRIPTION,
            ObligationKind::ChildSupport => CHILD_SUPPORT_DESCRIPTION,
            ObligationKind::MedicalSupport => MEDICAL_SUPPORT_DESCRIPTION,
            ObligationKind::DentalSupport => DENTAL_SUPPORT_DESCRIPTION,
        }
    }
}
