//! Report repository port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{CustomerId, ReportId, Timestamp};
use crate::domain::report::{Report, ReportError};

/// Storage errors surfaced by repository ports.
///
/// All store errors are retryable by the caller; the engine never corrupts
/// in-memory invariants in response to one.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The store could not be reached or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be mapped into a domain type.
    #[error("stored data invalid: {0}")]
    Corrupted(String),
}

impl RepositoryError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        RepositoryError::Unavailable(message.into())
    }

    /// Creates a corrupted-data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        RepositoryError::Corrupted(message.into())
    }

    /// True when retrying the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::Unavailable(_))
    }
}

impl From<RepositoryError> for ReportError {
    fn from(err: RepositoryError) -> Self {
        ReportError::store(err.to_string())
    }
}

/// Port for report persistence.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Loads a report by id.
    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, RepositoryError>;

    /// Loads the customer's most recently created report, if any.
    async fn find_latest_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<Report>, RepositoryError>;

    /// Inserts a newly generated report.
    async fn insert(&self, report: &Report) -> Result<(), RepositoryError>;

    /// Persists the current state of an existing report.
    async fn save(&self, report: &Report) -> Result<(), RepositoryError>;

    /// Sets `finalized_at` only if it is still unset.
    ///
    /// Returns true when this call performed the write. Concurrent lazy
    /// finalizers racing on the same report both succeed; the loser simply
    /// observes `false` and treats the workbook as finalized.
    async fn finalize_if_unfinalized(
        &self,
        id: &ReportId,
        finalized_at: Timestamp,
    ) -> Result<bool, RepositoryError>;
}
