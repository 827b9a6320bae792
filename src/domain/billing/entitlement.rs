//! Upgrade-credit and refresh entitlement decisions.
//!
//! Pure decision logic over an already-fetched purchase history. The engine
//! never writes purchases and never talks to the payment processor; callers
//! attach the decided coupon reference to a checkout session they create
//! themselves.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::report::ReportTier;

use super::purchase::PurchaseRecord;

/// Which stacked credit applies at checkout.
///
/// The credit table is a fixed combination lookup over the held tiers, not a
/// general pricing rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditKind {
    /// Credit for a prior Snapshot+ purchase.
    SnapshotPlus,
    /// Credit for a prior Blueprint purchase.
    Blueprint,
    /// Additive credit for holding both Snapshot+ and Blueprint when
    /// targeting Blueprint+; strictly larger than either single credit.
    FullStack,
}

impl CreditKind {
    /// Configuration key the coupon reference is looked up under.
    pub fn config_key(&self) -> &'static str {
        match self {
            CreditKind::SnapshotPlus => "snapshot_plus_credit",
            CreditKind::Blueprint => "blueprint_credit",
            CreditKind::FullStack => "full_stack_credit",
        }
    }
}

/// A decided upgrade credit, before coupon resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCredit {
    pub kind: CreditKind,
    pub description: String,
}

/// Decides the stacked upgrade credit for a checkout.
///
/// Returns `None` ("full price") when the customer holds nothing creditable,
/// or already holds a tier at or above the target. Holding both Snapshot+
/// and Blueprint when targeting Blueprint+ yields the full-stack credit
/// representing both prior tiers' prices.
pub fn upgrade_credit(purchases: &[PurchaseRecord], target: ReportTier) -> Option<UpgradeCredit> {
    let held: HashSet<ReportTier> = purchases
        .iter()
        .filter(|p| p.status.is_paid())
        .map(|p| p.tier)
        .collect();

    // A customer holding the target tier or anything above it has nothing to
    // upgrade to.
    if held.iter().any(|t| t.rank() >= target.rank()) {
        return None;
    }

    let holds_snapshot_plus = held.contains(&ReportTier::SnapshotPlus);
    let holds_blueprint = held.contains(&ReportTier::Blueprint);

    let kind = match target {
        ReportTier::BlueprintPlus => {
            if holds_snapshot_plus && holds_blueprint {
                Some(CreditKind::FullStack)
            } else if holds_blueprint {
                Some(CreditKind::Blueprint)
            } else if holds_snapshot_plus {
                Some(CreditKind::SnapshotPlus)
            } else {
                None
            }
        }
        ReportTier::Blueprint => holds_snapshot_plus.then_some(CreditKind::SnapshotPlus),
        // Snapshot holds no creditable prior; there is nothing below it.
        ReportTier::SnapshotPlus | ReportTier::Snapshot => None,
    }?;

    let description = match kind {
        CreditKind::SnapshotPlus => "Credit for your previous Snapshot+ purchase".to_string(),
        CreditKind::Blueprint => "Credit for your previous Blueprint purchase".to_string(),
        CreditKind::FullStack => {
            "Credit for your previous Snapshot+ and Blueprint purchases".to_string()
        }
    };

    Some(UpgradeCredit { kind, description })
}

/// Outcome of a refresh purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshDecision {
    /// No qualifying prior purchase; the refresh cannot be bought.
    Denied,
    /// Entitled; the caller should create a paid checkout session.
    RequiresCheckout,
    /// Top-tier holders skip checkout entirely and refresh at no charge.
    Free,
}

/// Decides whether a refresh at `parent_tier` is permitted.
///
/// A refresh is tied to a paid purchase at its parent tier or higher;
/// Blueprint+ holders refresh for free.
pub fn refresh_entitlement(
    purchases: &[PurchaseRecord],
    parent_tier: ReportTier,
) -> RefreshDecision {
    let paid = purchases.iter().filter(|p| p.status.is_paid());
    let mut qualifies = false;
    for purchase in paid {
        if purchase.tier == ReportTier::BlueprintPlus {
            return RefreshDecision::Free;
        }
        if purchase.tier.rank() >= parent_tier.rank() {
            qualifies = true;
        }
    }
    if qualifies {
        RefreshDecision::RequiresCheckout
    } else {
        RefreshDecision::Denied
    }
}
