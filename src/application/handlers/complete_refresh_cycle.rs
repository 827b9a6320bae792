//! CompleteRefreshCycleHandler - Records a finished report-refresh-purchase loop.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::CustomerId;
use crate::ports::RefreshUsageTracker;

/// Command marking a refresh cycle as completed.
#[derive(Debug, Clone)]
pub struct CompleteRefreshCycleCommand {
    pub customer_id: CustomerId,
}

/// Result carrying the customer's running cycle count. `None` when the
/// counter store was unreachable and the increment was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteRefreshCycleResult {
    pub completed_cycles: Option<u64>,
}

/// Handler that bumps the completed-cycle counter once a refreshed report
/// replaces its parent. The counter feeds retention analytics only; it never
/// gates anything, so a failed increment is logged and swallowed.
pub struct CompleteRefreshCycleHandler {
    usage: Arc<dyn RefreshUsageTracker>,
}

impl CompleteRefreshCycleHandler {
    pub fn new(usage: Arc<dyn RefreshUsageTracker>) -> Self {
        Self { usage }
    }

    pub async fn handle(&self, cmd: CompleteRefreshCycleCommand) -> CompleteRefreshCycleResult {
        match self.usage.record_completed_cycle(&cmd.customer_id).await {
            Ok(completed_cycles) => {
                info!(
                    customer_id = %cmd.customer_id,
                    completed_cycles,
                    "refresh cycle completed"
                );
                CompleteRefreshCycleResult {
                    completed_cycles: Some(completed_cycles),
                }
            }
            Err(err) => {
                warn!(
                    customer_id = %cmd.customer_id,
                    error = %err,
                    "refresh cycle counter unavailable; increment dropped"
                );
                CompleteRefreshCycleResult {
                    completed_cycles: None,
                }
            }
        }
    }
}
