//! GenerateReportHandler - Command handler for initial report generation.

use std::sync::Arc;

use tracing::info;

use crate::application::insight_augmenter::InsightAugmenter;
use crate::domain::foundation::{CustomerId, ReportId, Timestamp};
use crate::domain::pillar::Intake;
use crate::domain::report::{Report, ReportError, ReportTier};
use crate::ports::ReportRepository;

/// Command to generate a report from a completed intake.
#[derive(Debug, Clone)]
pub struct GenerateReportCommand {
    pub customer_id: Option<CustomerId>,
    pub owner_email: Option<String>,
    pub intake: Intake,
    pub tier: ReportTier,
}

/// Result of report generation.
#[derive(Debug, Clone)]
pub struct GenerateReportResult {
    pub report: Report,
    /// True when AI augmentation replaced the template insights.
    pub augmented: bool,
}

/// Handler for generating a report at intake completion.
///
/// Scoring, stage detection, and priority resolution run deterministically;
/// augmentation is attempted afterward when configured and its failure can
/// never fail the generation.
pub struct GenerateReportHandler {
    repository: Arc<dyn ReportRepository>,
    augmenter: Option<Arc<InsightAugmenter>>,
}

impl GenerateReportHandler {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        augmenter: Option<Arc<InsightAugmenter>>,
    ) -> Self {
        Self {
            repository,
            augmenter,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateReportCommand,
    ) -> Result<GenerateReportResult, ReportError> {
        // 1. Score, resolve priority, and build template insights.
        let mut report = Report::generate(
            ReportId::new(),
            cmd.customer_id,
            cmd.owner_email,
            &cmd.intake,
            cmd.tier,
        );

        // 2. Attempt augmentation; the templates stand on any failure.
        let mut augmented = false;
        if let Some(augmenter) = &self.augmenter {
            if let Some(insights) = augmenter.augment(&report).await {
                report.apply_insights(insights, Timestamp::now());
                augmented = true;
            }
        }

        // 3. Persist.
        self.repository.insert(&report).await?;

        info!(
            report_id = %report.id,
            tier = report.tier.key(),
            composite = report.composite(),
            primary = report.priority.primary.key(),
            augmented,
            "report generated"
        );

        Ok(GenerateReportResult { report, augmented })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{FailingTextGenerator, InMemoryReportRepository, ScriptedTextGenerator};
    use crate::domain::pillar::ClarityLevel;

    fn command() -> GenerateReportCommand {
        GenerateReportCommand {
            customer_id: Some(CustomerId::new("cus_1").unwrap()),
            owner_email: Some("owner@x.com".into()),
            intake: Intake {
                offer_clarity: Some(ClarityLevel::VeryClear),
                website_url: Some("https://example.com".into()),
                ..Intake::default()
            },
            tier: ReportTier::Snapshot,
        }
    }

    #[tokio::test]
    async fn generates_and_persists_without_augmenter() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let handler = GenerateReportHandler::new(repository.clone(), None);

        let result = handler.handle(command()).await.unwrap();

        assert!(!result.augmented);
        let stored = repository
            .find_by_id(&result.report.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.composite(), result.report.composite());
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_templates() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let augmenter = Arc::new(InsightAugmenter::new(
            Arc::new(FailingTextGenerator),
            5,
            900,
        ));
        let handler = GenerateReportHandler::new(repository.clone(), Some(augmenter));

        let result = handler.handle(command()).await.unwrap();

        assert!(!result.augmented);
        // Template insights are present despite the failure.
        for pillar in crate::domain::pillar::Pillar::ALL {
            assert!(!result.report.insights.get(pillar).insight.is_empty());
        }
    }

    #[tokio::test]
    async fn valid_provider_response_replaces_insights() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let response = r#"{
            "positioning": {"insight": "custom p", "recommendation": "do p"},
            "messaging": {"insight": "custom m", "recommendation": "do m"},
            "visibility": {"insight": "custom v", "recommendation": "do v"}
        }"#;
        let augmenter = Arc::new(InsightAugmenter::new(
            Arc::new(ScriptedTextGenerator::new(response)),
            5,
            900,
        ));
        let handler = GenerateReportHandler::new(repository, Some(augmenter));

        let result = handler.handle(command()).await.unwrap();

        assert!(result.augmented);
        assert_eq!(
            result
                .report
                .insights
                .get(crate::domain::pillar::Pillar::Positioning)
                .insight,
            "custom p"
        );
    }
}
