//! UpgradeReportHandler - Command handler for tier upgrade generation.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ReportId, Timestamp};
use crate::domain::report::{Report, ReportError, ReportTier, TierSections};
use crate::ports::ReportRepository;

/// Command to upgrade a stored report to a higher tier.
#[derive(Debug, Clone)]
pub struct UpgradeReportCommand {
    pub report_id: ReportId,
    pub target: ReportTier,
    /// The new tier's sections, generated by the caller.
    pub sections: TierSections,
}

/// Handler for upgrade generation.
///
/// Runs against the stored lower-tier row: foundation fields flow forward by
/// copy and the new sections layer on top. The lower tier is never
/// recomputed.
pub struct UpgradeReportHandler {
    repository: Arc<dyn ReportRepository>,
}

impl UpgradeReportHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpgradeReportCommand) -> Result<Report, ReportError> {
        let mut report = self
            .repository
            .find_by_id(&cmd.report_id)
            .await?
            .ok_or_else(|| ReportError::not_found(cmd.report_id))?;

        let from = report.tier;
        report.upgrade_to(cmd.target, cmd.sections, Timestamp::now())?;

        self.repository.save(&report).await?;

        info!(
            report_id = %report.id,
            from = from.key(),
            to = report.tier.key(),
            "report upgraded"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{seeded_report, InMemoryReportRepository};
    use crate::domain::report::PersonaSection;

    fn persona_sections() -> TierSections {
        TierSections {
            persona: Some(PersonaSection {
                archetype: "The Builder".into(),
                persona_summary: "Hands-on operator".into(),
                audience_traits: vec!["pragmatic".into()],
            }),
            ..TierSections::default()
        }
    }

    #[tokio::test]
    async fn upgrade_layers_sections_and_keeps_scores() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report(&repository).await;
        let handler = UpgradeReportHandler::new(repository.clone());

        let upgraded = handler
            .handle(UpgradeReportCommand {
                report_id: report.id,
                target: ReportTier::SnapshotPlus,
                sections: persona_sections(),
            })
            .await
            .unwrap();

        assert_eq!(upgraded.tier, ReportTier::SnapshotPlus);
        assert_eq!(upgraded.scores, report.scores);
        assert!(upgraded.sections.persona.is_some());
    }

    #[tokio::test]
    async fn downgrade_is_rejected() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let mut report = seeded_report(&repository).await;
        report.tier = ReportTier::Blueprint;
        repository.save(&report).await.unwrap();

        let handler = UpgradeReportHandler::new(repository);
        let result = handler
            .handle(UpgradeReportCommand {
                report_id: report.id,
                target: ReportTier::SnapshotPlus,
                sections: TierSections::default(),
            })
            .await;

        assert!(matches!(result, Err(ReportError::NotAnUpgrade { .. })));
    }

    #[tokio::test]
    async fn repeated_upgrade_to_same_target_conflicts() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report(&repository).await;
        let handler = UpgradeReportHandler::new(repository);

        let cmd = UpgradeReportCommand {
            report_id: report.id,
            target: ReportTier::SnapshotPlus,
            sections: persona_sections(),
        };
        handler.handle(cmd.clone()).await.unwrap();
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(ReportError::NotAnUpgrade { .. })));
    }
}
