//! RefineReportHandler - Command handler for score refinement.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ReportId, Timestamp};
use crate::domain::pillar::{score_pillars, Intake};
use crate::domain::report::{Report, ReportError};
use crate::ports::ReportRepository;

/// Command to refine a report from an updated intake.
#[derive(Debug, Clone)]
pub struct RefineReportCommand {
    pub report_id: ReportId,
    pub intake: Intake,
}

/// Handler for refinement.
///
/// Refinement rescores the intake with the same weight table and composite
/// formula as initial generation, appends the result to the score history,
/// and overwrites the current scores. The stage is never re-derived.
pub struct RefineReportHandler {
    repository: Arc<dyn ReportRepository>,
}

impl RefineReportHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RefineReportCommand) -> Result<Report, ReportError> {
        let mut report = self
            .repository
            .find_by_id(&cmd.report_id)
            .await?
            .ok_or_else(|| ReportError::not_found(cmd.report_id))?;

        let previous_composite = report.composite();
        let new_scores = score_pillars(&cmd.intake);
        report.refine(new_scores, Timestamp::now());

        self.repository.save(&report).await?;

        info!(
            report_id = %report.id,
            previous_composite,
            composite = report.composite(),
            history_entries = report.score_history.len(),
            "report refined"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{seeded_report, InMemoryReportRepository};
    use crate::domain::pillar::ClarityLevel;
    use crate::domain::report::ScoreSource;

    #[tokio::test]
    async fn refinement_appends_history_and_persists() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report(&repository).await;
        let handler = RefineReportHandler::new(repository.clone());

        let refined = handler
            .handle(RefineReportCommand {
                report_id: report.id,
                intake: Intake {
                    offer_clarity: Some(ClarityLevel::VeryClear),
                    target_customers: Some("founders".into()),
                    ..Intake::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(refined.score_history.len(), 2);
        assert_eq!(refined.score_history[1].source, ScoreSource::Refinement);

        let stored = repository.find_by_id(&report.id).await.unwrap().unwrap();
        assert_eq!(stored.composite(), refined.composite());
    }

    #[tokio::test]
    async fn missing_report_is_a_named_outcome() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let handler = RefineReportHandler::new(repository);

        let result = handler
            .handle(RefineReportCommand {
                report_id: ReportId::new(),
                intake: Intake::default(),
            })
            .await;

        assert!(matches!(result, Err(ReportError::NotFound { .. })));
    }
}
