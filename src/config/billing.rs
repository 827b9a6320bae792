//! Discount coupon configuration.

use serde::Deserialize;

use crate::domain::billing::CreditKind;

use super::error::ValidationError;

/// Coupon references for the stacked upgrade credits.
///
/// Every field is optional on purpose: an absent coupon degrades a checkout
/// to full price instead of blocking it. Validation only rejects coupons
/// that are present but blank, which would be a deployment mistake.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingConfig {
    /// Coupon applied for a prior Snapshot+ purchase.
    pub snapshot_plus_coupon: Option<String>,

    /// Coupon applied for a prior Blueprint purchase.
    pub blueprint_coupon: Option<String>,

    /// Additive coupon applied when both prior tiers are held.
    pub full_stack_coupon: Option<String>,
}

impl BillingConfig {
    /// Resolves a credit kind to its configured coupon reference.
    pub fn coupon_for(&self, kind: CreditKind) -> Option<&str> {
        let coupon = match kind {
            CreditKind::SnapshotPlus => &self.snapshot_plus_coupon,
            CreditKind::Blueprint => &self.blueprint_coupon,
            CreditKind::FullStack => &self.full_stack_coupon,
        };
        coupon.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("billing.snapshot_plus_coupon", &self.snapshot_plus_coupon),
            ("billing.blueprint_coupon", &self.blueprint_coupon),
            ("billing.full_stack_coupon", &self.full_stack_coupon),
        ] {
            if let Some(v) = value {
                if v.trim().is_empty() {
                    return Err(ValidationError::invalid(field, "must not be blank if set"));
                }
            }
        }
        Ok(())
    }
}
