//! WorkbookStatusHandler - Read path that derives editability and performs
//! the lazy finalize write when the review window has expired.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::{ReportId, Timestamp};
use crate::domain::report::ReportError;
use crate::domain::workbook::{evaluate, WorkbookStatus};
use crate::ports::ReportRepository;

/// Command to read a workbook's status.
#[derive(Debug, Clone)]
pub struct WorkbookStatusCommand {
    pub report_id: ReportId,
}

/// Handler for the workbook status read.
pub struct WorkbookStatusHandler {
    repository: Arc<dyn ReportRepository>,
}

impl WorkbookStatusHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: WorkbookStatusCommand) -> Result<WorkbookStatus, ReportError> {
        // 1. Load the report.
        let report = self
            .repository
            .find_by_id(&cmd.report_id)
            .await?
            .ok_or_else(|| ReportError::not_found(cmd.report_id))?;

        // 2. Derive status from {tier, created_at, finalized_at} and the clock.
        let now = Timestamp::now();
        let status = evaluate(report.tier, report.created_at, report.finalized_at, now);

        // 3. Persist an expired window the first time a read observes it. The
        //    derived status is already correct, so a failed or lost-race write
        //    only delays the bookkeeping to the next read.
        if status.needs_lazy_finalize {
            match self
                .repository
                .finalize_if_unfinalized(&cmd.report_id, now)
                .await
            {
                Ok(true) => {
                    debug!(report_id = %cmd.report_id, "review window expired; workbook finalized on read");
                }
                Ok(false) => {
                    debug!(report_id = %cmd.report_id, "lazy finalize already applied by a concurrent read");
                }
                Err(err) => {
                    warn!(
                        report_id = %cmd.report_id,
                        error = %err,
                        "lazy finalize write failed; status served from derived state"
                    );
                }
            }
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        seeded_report, seeded_report_with, InMemoryReportRepository,
    };
    use crate::domain::report::ReportTier;
    use crate::domain::workbook::WorkbookState;

    #[tokio::test]
    async fn fresh_workbook_reports_full_window() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report(&repository).await;
        let handler = WorkbookStatusHandler::new(repository);

        let status = handler
            .handle(WorkbookStatusCommand {
                report_id: report.id,
            })
            .await
            .unwrap();

        assert_eq!(status.state, WorkbookState::Editable);
        assert_eq!(status.review_days_remaining, Some(14));
    }

    #[tokio::test]
    async fn expired_window_is_finalized_by_the_read() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let mut report = seeded_report(&repository).await;
        report.created_at = Timestamp::now().minus_days(20);
        repository.save(&report).await.unwrap();
        let handler = WorkbookStatusHandler::new(repository.clone());

        let status = handler
            .handle(WorkbookStatusCommand {
                report_id: report.id,
            })
            .await
            .unwrap();

        assert_eq!(status.state, WorkbookState::Finalized);
        let stored = repository.find_by_id(&report.id).await.unwrap().unwrap();
        assert!(stored.finalized_at.is_some());
    }

    #[tokio::test]
    async fn permanently_editable_tier_never_finalizes() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let mut report =
            seeded_report_with(&repository, ReportTier::BlueprintPlus, None, None).await;
        report.created_at = Timestamp::now().minus_days(400);
        repository.save(&report).await.unwrap();
        let handler = WorkbookStatusHandler::new(repository.clone());

        let status = handler
            .handle(WorkbookStatusCommand {
                report_id: report.id,
            })
            .await
            .unwrap();

        assert_eq!(status.state, WorkbookState::Editable);
        assert_eq!(status.review_days_remaining, None);
        let stored = repository.find_by_id(&report.id).await.unwrap().unwrap();
        assert!(stored.finalized_at.is_none());
    }

    #[tokio::test]
    async fn missing_report_is_not_found() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let handler = WorkbookStatusHandler::new(repository);

        let err = handler
            .handle(WorkbookStatusCommand {
                report_id: ReportId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::NotFound { .. }));
    }
}
