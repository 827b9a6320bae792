//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Stable code for wire serialization.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

/// Stable error codes for the engine's failure outcomes.
///
/// Policy violations (finalized workbook, denied access, tier mismatch) are
/// first-class outcomes surfaced to callers; the typed errors carry the
/// detail, and `code()` on each error enum maps into this vocabulary so the
/// consuming HTTP layer can serialize failures without matching on every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    ReportNotFound,

    // State errors
    WorkbookFinalized,
    AlreadyFinalized,

    // Access errors
    AccessDenied,
    RateLimited,
    TierMismatch,
    InvalidTierProof,
    ExpiredTierProof,

    // Infrastructure errors
    DatabaseError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ReportNotFound => "REPORT_NOT_FOUND",
            ErrorCode::WorkbookFinalized => "WORKBOOK_FINALIZED",
            ErrorCode::AlreadyFinalized => "ALREADY_FINALIZED",
            ErrorCode::AccessDenied => "ACCESS_DENIED",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::TierMismatch => "TIER_MISMATCH",
            ErrorCode::InvalidTierProof => "INVALID_TIER_PROOF",
            ErrorCode::ExpiredTierProof => "EXPIRED_TIER_PROOF",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("owner_email");
        assert_eq!(format!("{}", err), "Field 'owner_email' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("pillar_score", 0, 20, 25);
        assert_eq!(
            format!("{}", err),
            "Field 'pillar_score' must be between 0 and 20, got 25"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::WorkbookFinalized), "WORKBOOK_FINALIZED");
        assert_eq!(format!("{}", ErrorCode::InvalidTierProof), "INVALID_TIER_PROOF");
    }

    #[test]
    fn validation_errors_map_to_their_codes() {
        assert_eq!(
            ValidationError::empty_field("owner_email").code(),
            ErrorCode::EmptyField
        );
        assert_eq!(
            ValidationError::out_of_range("pillar_score", 0, 20, 25).code(),
            ErrorCode::OutOfRange
        );
    }
}
