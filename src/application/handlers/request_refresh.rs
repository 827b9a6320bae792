//! RequestRefreshHandler - Entitlement check for a diagnostic refresh.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::billing::{refresh_entitlement, RefreshDecision};
use crate::domain::foundation::ReportId;
use crate::domain::report::ReportError;
use crate::ports::{PurchaseReader, ReportRepository};

/// Command to check whether a customer may refresh a report.
#[derive(Debug, Clone)]
pub struct RequestRefreshCommand {
    pub report_id: ReportId,
}

/// Outcome of a refresh request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRefreshResult {
    pub decision: RefreshDecision,
}

/// Handler for refresh entitlement.
///
/// Unlike the credit path this is an authorization gate, so a failed history
/// lookup fails closed into Denied rather than degrading open.
pub struct RequestRefreshHandler {
    repository: Arc<dyn ReportRepository>,
    purchases: Arc<dyn PurchaseReader>,
}

impl RequestRefreshHandler {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        purchases: Arc<dyn PurchaseReader>,
    ) -> Self {
        Self {
            repository,
            purchases,
        }
    }

    pub async fn handle(&self, cmd: RequestRefreshCommand) -> Result<RequestRefreshResult, ReportError> {
        // 1. Load the parent report being refreshed.
        let report = self
            .repository
            .find_by_id(&cmd.report_id)
            .await?
            .ok_or_else(|| ReportError::not_found(cmd.report_id))?;

        // 2. Anonymous reports carry no purchase history to refresh against.
        let Some(customer_id) = report.customer_id.as_ref() else {
            return Ok(RequestRefreshResult {
                decision: RefreshDecision::Denied,
            });
        };

        // 3. Fail closed when the history cannot be read.
        let history = match self.purchases.history(customer_id).await {
            Ok(history) => history,
            Err(err) => {
                warn!(
                    report_id = %cmd.report_id,
                    error = %err,
                    "purchase history unavailable; refresh denied"
                );
                return Ok(RequestRefreshResult {
                    decision: RefreshDecision::Denied,
                });
            }
        };

        let decision = refresh_entitlement(&history, report.tier);
        info!(
            report_id = %cmd.report_id,
            parent_tier = report.tier.key(),
            decision = ?decision,
            "refresh entitlement decided"
        );

        Ok(RequestRefreshResult { decision })
    }
}
