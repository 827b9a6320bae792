//! Purchase records, owned by the billing collaborator.
//!
//! The engine only ever reads these; the append-only history is written by
//! the payment webhook flow outside this crate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, Timestamp};
use crate::domain::report::ReportTier;

/// Settlement status of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    /// Payment settled; the only status that grants entitlements.
    Paid,
    /// Checkout started but not completed.
    Pending,
    /// Payment failed or was abandoned.
    Failed,
    /// Payment was refunded after settling.
    Refunded,
}

impl PurchaseStatus {
    /// True only for settled payments.
    pub fn is_paid(&self) -> bool {
        matches!(self, PurchaseStatus::Paid)
    }
}

/// One entry in a customer's purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub customer_id: CustomerId,
    pub tier: ReportTier,
    pub status: PurchaseStatus,
    pub purchased_at: Timestamp,
}

impl PurchaseRecord {
    /// Creates a paid purchase record (test and fixture convenience).
    pub fn paid(customer_id: CustomerId, tier: ReportTier, purchased_at: Timestamp) -> Self {
        Self {
            customer_id,
            tier,
            status: PurchaseStatus::Paid,
            purchased_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paid_status_grants_entitlement() {
        assert!(PurchaseStatus::Paid.is_paid());
        assert!(!PurchaseStatus::Pending.is_paid());
        assert!(!PurchaseStatus::Failed.is_paid());
        assert!(!PurchaseStatus::Refunded.is_paid());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&PurchaseStatus::Refunded).unwrap();
        assert_eq!(json, "\"refunded\"");
    }
}
