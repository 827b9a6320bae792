//! PostgreSQL adapters for the storage ports.

mod purchase_reader;
mod refresh_usage;
mod report_repository;

pub use purchase_reader::PostgresPurchaseReader;
pub use refresh_usage::PostgresRefreshUsageTracker;
pub use report_repository::PostgresReportRepository;
