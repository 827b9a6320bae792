//! Report-level errors.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ReportId};

use super::tier::ReportTier;

/// Errors raised by report operations.
///
/// Policy violations are distinct named variants because they are meaningful
/// business states the caller must branch on; only `Store` represents
/// infrastructure trouble, and it is retryable by the caller.
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    #[error("report {id} not found")]
    NotFound { id: ReportId },

    #[error("tier {target} is not an upgrade from {current}")]
    NotAnUpgrade {
        current: ReportTier,
        target: ReportTier,
    },

    #[error("workbook is finalized and read-only")]
    WorkbookFinalized,

    #[error("workbook is already finalized")]
    AlreadyFinalized,

    #[error("invalid report data: {0}")]
    Validation(String),

    #[error("report store error: {0}")]
    Store(String),
}

impl ReportError {
    /// Creates a not-found error.
    pub fn not_found(id: ReportId) -> Self {
        ReportError::NotFound { id }
    }

    /// Creates a not-an-upgrade error.
    pub fn not_an_upgrade(current: ReportTier, target: ReportTier) -> Self {
        ReportError::NotAnUpgrade { current, target }
    }

    /// Creates a store error.
    pub fn store(message: impl Into<String>) -> Self {
        ReportError::Store(message.into())
    }

    /// Stable code for wire serialization.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReportError::NotFound { .. } => ErrorCode::ReportNotFound,
            ReportError::NotAnUpgrade { .. } => ErrorCode::TierMismatch,
            ReportError::WorkbookFinalized => ErrorCode::WorkbookFinalized,
            ReportError::AlreadyFinalized => ErrorCode::AlreadyFinalized,
            ReportError::Validation(_) => ErrorCode::ValidationFailed,
            ReportError::Store(_) => ErrorCode::DatabaseError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalized_errors_are_distinct_from_not_found() {
        let finalized = ReportError::WorkbookFinalized;
        let missing = ReportError::not_found(ReportId::new());
        assert_ne!(finalized.to_string(), missing.to_string());
        assert!(matches!(finalized, ReportError::WorkbookFinalized));
    }

    #[test]
    fn codes_separate_policy_from_infrastructure() {
        assert_eq!(
            ReportError::WorkbookFinalized.code(),
            ErrorCode::WorkbookFinalized
        );
        assert_eq!(
            ReportError::store("connection reset").code(),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn not_an_upgrade_names_both_tiers() {
        let err = ReportError::not_an_upgrade(ReportTier::Blueprint, ReportTier::SnapshotPlus);
        assert_eq!(err.to_string(), "tier Snapshot+ is not an upgrade from Blueprint");
    }
}
