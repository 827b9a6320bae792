//! Access attempt limiter port.
//!
//! Replaces process-local lockout maps with an externally shared,
//! TTL-backed counter keyed by report identity, so limits survive restarts
//! and hold across instances.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::ReportId;

/// Result of registering one access attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptOutcome {
    /// False once the window's limit is exceeded.
    pub allowed: bool,
    /// Attempts seen in the current window, including this one.
    pub attempts: u32,
    /// The window's limit.
    pub limit: u32,
}

/// Limiter errors.
#[derive(Debug, Clone, Error)]
pub enum LimiterError {
    #[error("limiter unavailable: {0}")]
    Unavailable(String),
}

/// Port for TTL-windowed access attempt counting.
#[async_trait]
pub trait AccessAttemptLimiter: Send + Sync {
    /// Counts one access attempt against the report's current window.
    async fn register_attempt(&self, report_id: &ReportId) -> Result<AttemptOutcome, LimiterError>;
}
