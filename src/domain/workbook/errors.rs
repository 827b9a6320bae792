//! Workbook lifecycle errors.

use thiserror::Error;

use crate::domain::report::ReportError;

/// Errors raised by workbook lifecycle operations.
///
/// Each variant is a distinct business outcome: a second finalize attempt
/// must surface a conflict (so the caller knows nothing changed), and a
/// rejected edit must be distinguishable from not-found or unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkbookError {
    #[error("workbook is already finalized")]
    AlreadyFinalized,

    #[error("workbook is finalized and read-only")]
    ReadOnlyFinalized,

    #[error("this tier's workbook is permanently editable and never finalizes")]
    PermanentlyEditable,
}

impl From<WorkbookError> for ReportError {
    fn from(err: WorkbookError) -> Self {
        match err {
            WorkbookError::AlreadyFinalized => ReportError::AlreadyFinalized,
            WorkbookError::ReadOnlyFinalized => ReportError::WorkbookFinalized,
            WorkbookError::PermanentlyEditable => {
                ReportError::Validation("this tier's workbook never finalizes".to_string())
            }
        }
    }
}
