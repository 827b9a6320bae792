//! Purchase history reader port.

use async_trait::async_trait;

use crate::domain::billing::PurchaseRecord;
use crate::domain::foundation::CustomerId;

use super::report_repository::RepositoryError;

/// Read-only view of the billing collaborator's purchase history.
///
/// The history is append-only and owned elsewhere; the engine only reads the
/// latest state at decision time. Failures here must never block a checkout:
/// callers degrade to "no credit, full price".
#[async_trait]
pub trait PurchaseReader: Send + Sync {
    /// Returns the customer's full purchase history, any status.
    async fn history(&self, customer_id: &CustomerId) -> Result<Vec<PurchaseRecord>, RepositoryError>;
}
