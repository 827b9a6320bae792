//! FinalizeWorkbookHandler - Explicit owner-initiated workbook finalize.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ReportId, Timestamp};
use crate::domain::report::ReportError;
use crate::domain::workbook;
use crate::ports::ReportRepository;

/// Command to finalize a workbook ahead of its review window.
#[derive(Debug, Clone)]
pub struct FinalizeWorkbookCommand {
    pub report_id: ReportId,
}

/// Result carrying the persisted finalize timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizeWorkbookResult {
    pub finalized_at: Timestamp,
}

/// Handler for the explicit finalize action.
pub struct FinalizeWorkbookHandler {
    repository: Arc<dyn ReportRepository>,
}

impl FinalizeWorkbookHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: FinalizeWorkbookCommand,
    ) -> Result<FinalizeWorkbookResult, ReportError> {
        // 1. Load the report.
        let report = self
            .repository
            .find_by_id(&cmd.report_id)
            .await?
            .ok_or_else(|| ReportError::not_found(cmd.report_id))?;

        // 2. Validate the transition against tier and current finalize state.
        let finalized_at = workbook::finalize(report.tier, report.finalized_at, Timestamp::now())?;

        // 3. Conditional write; a lost race means someone else finalized
        //    between our read and write, which is the same conflict.
        let written = self
            .repository
            .finalize_if_unfinalized(&cmd.report_id, finalized_at)
            .await?;
        if !written {
            return Err(ReportError::AlreadyFinalized);
        }

        info!(report_id = %cmd.report_id, "workbook finalized by owner");
        Ok(FinalizeWorkbookResult { finalized_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        seeded_report, seeded_report_with, InMemoryReportRepository,
    };
    use crate::domain::report::ReportTier;

    #[tokio::test]
    async fn finalize_persists_the_timestamp() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report(&repository).await;
        let handler = FinalizeWorkbookHandler::new(repository.clone());

        let result = handler
            .handle(FinalizeWorkbookCommand {
                report_id: report.id,
            })
            .await
            .unwrap();

        let stored = repository.find_by_id(&report.id).await.unwrap().unwrap();
        assert_eq!(stored.finalized_at, Some(result.finalized_at));
    }

    #[tokio::test]
    async fn second_finalize_conflicts() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report(&repository).await;
        let handler = FinalizeWorkbookHandler::new(repository);

        handler
            .handle(FinalizeWorkbookCommand {
                report_id: report.id,
            })
            .await
            .unwrap();
        let err = handler
            .handle(FinalizeWorkbookCommand {
                report_id: report.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::AlreadyFinalized));
    }

    #[tokio::test]
    async fn permanently_editable_tier_cannot_finalize() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report =
            seeded_report_with(&repository, ReportTier::BlueprintPlus, None, None).await;
        let handler = FinalizeWorkbookHandler::new(repository.clone());

        let err = handler
            .handle(FinalizeWorkbookCommand {
                report_id: report.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Validation(_)));
        let stored = repository.find_by_id(&report.id).await.unwrap().unwrap();
        assert!(stored.finalized_at.is_none());
    }
}
