//! Workbook editability: the time-windowed finalize lifecycle.

mod editability;
mod errors;

pub use editability::{
    ensure_editable, evaluate, finalize, review_days_remaining, WorkbookState, WorkbookStatus,
    REVIEW_WINDOW_DAYS,
};
pub use errors::WorkbookError;
