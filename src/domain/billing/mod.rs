//! Billing decisions: upgrade credits and refresh entitlement.

mod entitlement;
mod purchase;

pub use entitlement::{refresh_entitlement, upgrade_credit, CreditKind, RefreshDecision, UpgradeCredit};
pub use purchase::{PurchaseRecord, PurchaseStatus};
