//! DecideUpgradeCreditHandler - Checkout-time upgrade credit decision.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::BillingConfig;
use crate::domain::billing::{upgrade_credit, CreditKind};
use crate::domain::foundation::CustomerId;
use crate::domain::report::ReportTier;
use crate::ports::PurchaseReader;

/// Command to decide the credit for an upgrade checkout.
#[derive(Debug, Clone)]
pub struct DecideUpgradeCreditCommand {
    pub customer_id: CustomerId,
    pub target: ReportTier,
}

/// A credit resolved to a concrete coupon reference.
///
/// The caller attaches the coupon to the checkout session it creates; this
/// handler never talks to the payment processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredit {
    pub kind: CreditKind,
    pub coupon_id: String,
    pub description: String,
}

/// Handler for the upgrade credit decision.
///
/// Nothing on this path may block a purchase: a failed history lookup and a
/// missing coupon configuration both degrade to "no credit, full price".
pub struct DecideUpgradeCreditHandler {
    purchases: Arc<dyn PurchaseReader>,
    billing: BillingConfig,
}

impl DecideUpgradeCreditHandler {
    pub fn new(purchases: Arc<dyn PurchaseReader>, billing: BillingConfig) -> Self {
        Self { purchases, billing }
    }

    pub async fn handle(&self, cmd: DecideUpgradeCreditCommand) -> Option<ResolvedCredit> {
        // 1. Read the latest purchase history; degrade on failure.
        let history = match self.purchases.history(&cmd.customer_id).await {
            Ok(history) => history,
            Err(err) => {
                warn!(
                    customer_id = %cmd.customer_id,
                    error = %err,
                    "purchase history unavailable; checkout proceeds at full price"
                );
                return None;
            }
        };

        // 2. Pure combination lookup over held tiers.
        let credit = upgrade_credit(&history, cmd.target)?;

        // 3. Resolve the coupon reference; degrade if unconfigured.
        let coupon_id = match self.billing.coupon_for(credit.kind) {
            Some(coupon) => coupon.to_string(),
            None => {
                warn!(
                    customer_id = %cmd.customer_id,
                    credit = credit.kind.config_key(),
                    "credit earned but no coupon configured; checkout proceeds at full price"
                );
                return None;
            }
        };

        info!(
            customer_id = %cmd.customer_id,
            target = cmd.target.key(),
            credit = credit.kind.config_key(),
            "upgrade credit applied"
        );

        Some(ResolvedCredit {
            kind: credit.kind,
            coupon_id,
            description: credit.description,
        })
    }
}
