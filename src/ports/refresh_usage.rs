//! Refresh usage tracker port.

use async_trait::async_trait;

use crate::domain::foundation::CustomerId;

use super::report_repository::RepositoryError;

/// Per-customer monotonically increasing refresh usage counter.
///
/// Incremented exactly once per completed (not merely started) assessment
/// cycle; the handler is responsible for calling `record_completed_cycle`
/// only at completion.
#[async_trait]
pub trait RefreshUsageTracker: Send + Sync {
    /// Records one completed refresh cycle and returns the new total.
    async fn record_completed_cycle(&self, customer_id: &CustomerId)
        -> Result<u64, RepositoryError>;

    /// Returns the number of completed refresh cycles.
    async fn completed_cycles(&self, customer_id: &CustomerId) -> Result<u64, RepositoryError>;
}
