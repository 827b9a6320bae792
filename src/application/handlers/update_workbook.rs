//! UpdateWorkbookHandler - Guarded mutation of a workbook's section content.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{ReportId, Timestamp};
use crate::domain::report::{Report, ReportError, TierSections};
use crate::domain::workbook::{ensure_editable, evaluate};
use crate::ports::ReportRepository;

/// Command to apply workbook edits.
#[derive(Debug, Clone)]
pub struct UpdateWorkbookCommand {
    pub report_id: ReportId,
    /// Provided sections replace stored ones; absent sections are untouched.
    pub edits: TierSections,
}

/// Handler for workbook mutations.
///
/// Every edit re-derives editability first, so an expired review window is
/// enforced even when no status read ever ran the lazy finalize.
pub struct UpdateWorkbookHandler {
    repository: Arc<dyn ReportRepository>,
}

impl UpdateWorkbookHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateWorkbookCommand) -> Result<Report, ReportError> {
        // 1. Load the report.
        let mut report = self
            .repository
            .find_by_id(&cmd.report_id)
            .await?
            .ok_or_else(|| ReportError::not_found(cmd.report_id))?;

        // 2. Reject edits against a finalized workbook, including one whose
        //    window expired but has not been lazily finalized yet.
        let now = Timestamp::now();
        let status = evaluate(report.tier, report.created_at, report.finalized_at, now);
        if status.needs_lazy_finalize {
            if let Err(err) = self
                .repository
                .finalize_if_unfinalized(&cmd.report_id, now)
                .await
            {
                warn!(
                    report_id = %cmd.report_id,
                    error = %err,
                    "lazy finalize write failed; edit rejected from derived state"
                );
            }
        }
        ensure_editable(&status)?;

        // 3. Apply the edits and persist.
        report.edit_sections(cmd.edits, now);
        self.repository.save(&report).await?;

        info!(report_id = %cmd.report_id, "workbook sections updated");
        Ok(report)
    }
}
