//! Ports: contracts the engine's collaborators implement.

mod access_limiter;
mod purchase_reader;
mod refresh_usage;
mod report_repository;
mod text_generator;

pub use access_limiter::{AccessAttemptLimiter, AttemptOutcome, LimiterError};
pub use purchase_reader::PurchaseReader;
pub use refresh_usage::RefreshUsageTracker;
pub use report_repository::{ReportRepository, RepositoryError};
pub use text_generator::{
    GenerationError, GenerationRequest, Message, MessageRole, TextGenerator,
};
