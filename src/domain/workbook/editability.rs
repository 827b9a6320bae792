//! Workbook editability lifecycle.
//!
//! The editable-then-finalized state is derived from `{tier, created_at,
//! finalized_at}` on every read rather than stored as its own column. There
//! is no background timer: an expired review window is finalized lazily by
//! the next read, through a conditional store update the caller performs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::report::ReportTier;

use super::errors::WorkbookError;

/// Fixed review window after which a workbook finalizes on next read.
pub const REVIEW_WINDOW_DAYS: i64 = 14;

const SECS_PER_DAY: i64 = 86_400;

/// The two workbook lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkbookState {
    Editable,
    Finalized,
}

/// Derived workbook status at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookStatus {
    pub state: WorkbookState,
    /// Whole days left in the review window. `None` for the permanently
    /// editable tier, `Some(0)` once the window has closed.
    pub review_days_remaining: Option<i64>,
    /// True when the window has expired but `finalized_at` is still unset:
    /// the reader must perform the lazy finalize write before returning.
    pub needs_lazy_finalize: bool,
}

/// Derives the workbook status for a report.
///
/// Blueprint+ is permanently editable and never finalizes. Every other tier
/// starts editable and finalizes either explicitly or implicitly once
/// `now - created_at` exceeds the 14-day review window.
pub fn evaluate(
    tier: ReportTier,
    created_at: Timestamp,
    finalized_at: Option<Timestamp>,
    now: Timestamp,
) -> WorkbookStatus {
    if tier.is_permanently_editable() {
        return WorkbookStatus {
            state: WorkbookState::Editable,
            review_days_remaining: None,
            needs_lazy_finalize: false,
        };
    }

    if finalized_at.is_some() {
        return WorkbookStatus {
            state: WorkbookState::Finalized,
            review_days_remaining: Some(0),
            needs_lazy_finalize: false,
        };
    }

    let remaining = review_days_remaining(created_at, now);
    if remaining == 0 {
        WorkbookStatus {
            state: WorkbookState::Finalized,
            review_days_remaining: Some(0),
            needs_lazy_finalize: true,
        }
    } else {
        WorkbookStatus {
            state: WorkbookState::Editable,
            review_days_remaining: Some(remaining),
            needs_lazy_finalize: false,
        }
    }
}

/// Whole days remaining in the review window:
/// `max(0, ceil((created_at + 14d - now) / 1d))`.
pub fn review_days_remaining(created_at: Timestamp, now: Timestamp) -> i64 {
    let deadline = created_at.add_days(REVIEW_WINDOW_DAYS);
    let remaining_secs = deadline.duration_since(&now).num_seconds();
    if remaining_secs <= 0 {
        0
    } else {
        (remaining_secs + SECS_PER_DAY - 1) / SECS_PER_DAY
    }
}

/// Validates an explicit finalize action, returning the finalize timestamp
/// to persist.
///
/// A second finalize reports a conflict rather than silently succeeding, so
/// the caller knows nothing changed. The permanently editable tier has no
/// finalize transition at all.
pub fn finalize(
    tier: ReportTier,
    finalized_at: Option<Timestamp>,
    now: Timestamp,
) -> Result<Timestamp, WorkbookError> {
    if tier.is_permanently_editable() {
        return Err(WorkbookError::PermanentlyEditable);
    }
    if finalized_at.is_some() {
        return Err(WorkbookError::AlreadyFinalized);
    }
    Ok(now)
}

/// Guards a mutation against a finalized workbook.
pub fn ensure_editable(status: &WorkbookStatus) -> Result<(), WorkbookError> {
    match status.state {
        WorkbookState::Editable => Ok(()),
        WorkbookState::Finalized => Err(WorkbookError::ReadOnlyFinalized),
    }
}
