//! Reconciling recorded payments against what fell due.

pub mod compliance;
pub mod payments;
pub mod reconcile;
pub mod violations;

pub use compliance::{compliance_report, ComplianceLine};
pub use payments::{parse_payments, payments_made, ParseWarning, PaymentLedger, PaymentRecord};
pub use reconcile::{enforcement_report, reconcile, Reconciliation, ReconciliationRow};
pub use violations::{arrearage_totals, violations, ArrearageSummary, TOTAL_LABEL};
