//! The Report aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, ReportId, Timestamp};
use crate::domain::pillar::{
    detect_stage, resolve_priority, score_pillars, BrandStage, Intake, Pillar, PillarPriority,
    PillarScores,
};

use super::errors::ReportError;
use super::insights::{template_insights, PillarInsights};
use super::merger::{merge_up_tier, TierPayload, TierSections};
use super::tier::ReportTier;

/// Where a score-history entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    /// The initial generation at intake completion.
    Initial,
    /// A refinement that overwrote the current scores.
    Refinement,
}

/// One append-only score-history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub recorded_at: Timestamp,
    pub composite: u8,
    pub scores: PillarScores,
    pub source: ScoreSource,
}

/// A customer's diagnostic report.
///
/// Created at intake completion and mutated only by refinement (which
/// appends to the score history before overwriting current scores) and by
/// tier upgrades (which add sections without touching scores). Never
/// hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub customer_id: Option<CustomerId>,
    /// Owner email used by the access controller; reports created from
    /// anonymous intakes have none.
    pub owner_email: Option<String>,
    pub tier: ReportTier,
    pub scores: PillarScores,
    /// Derived once at generation; refinement does not re-derive it.
    pub stage: BrandStage,
    pub priority: PillarPriority,
    pub insights: PillarInsights,
    pub recommendations: Vec<String>,
    pub context_coverage: u8,
    pub sections: TierSections,
    pub score_history: Vec<ScoreSnapshot>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub finalized_at: Option<Timestamp>,
}

impl Report {
    /// Generates a new report from a completed intake.
    ///
    /// Scoring, stage detection, priority resolution, and template insights
    /// all happen here, exactly once. Later tiers copy these values forward.
    pub fn generate(
        id: ReportId,
        customer_id: Option<CustomerId>,
        owner_email: Option<String>,
        intake: &Intake,
        tier: ReportTier,
    ) -> Self {
        let scores = score_pillars(intake);
        let stage = detect_stage(intake);
        let priority = resolve_priority(&scores);
        let insights = template_insights(&scores, stage);
        let recommendations = ordered_recommendations(&priority, &insights);
        let now = Timestamp::now();

        Self {
            id,
            customer_id,
            owner_email,
            tier,
            scores,
            stage,
            priority,
            insights,
            recommendations,
            context_coverage: intake.context_coverage(),
            sections: TierSections::default(),
            score_history: vec![ScoreSnapshot {
                recorded_at: now,
                composite: scores.composite(),
                scores,
                source: ScoreSource::Initial,
            }],
            created_at: now,
            updated_at: now,
            finalized_at: None,
        }
    }

    /// The canonical 0-100 composite for the current scores.
    pub fn composite(&self) -> u8 {
        self.scores.composite()
    }

    /// Applies a refinement: appends the new scores to the history and
    /// overwrites the current scores, priority, and insight text.
    ///
    /// The stage is immutable once computed and is deliberately not
    /// re-derived here.
    pub fn refine(&mut self, new_scores: PillarScores, now: Timestamp) {
        self.scores = new_scores;
        self.priority = resolve_priority(&new_scores);
        self.insights = template_insights(&new_scores, self.stage);
        self.recommendations = ordered_recommendations(&self.priority, &self.insights);
        self.score_history.push(ScoreSnapshot {
            recorded_at: now,
            composite: new_scores.composite(),
            scores: new_scores,
            source: ScoreSource::Refinement,
        });
        self.updated_at = now;
    }

    /// Replaces the insight text, keeping the recommendation ordering in
    /// sync with the current priority.
    ///
    /// Used by the AI augmenter after its response passes validation; scores
    /// and priority are untouched.
    pub fn apply_insights(&mut self, insights: PillarInsights, now: Timestamp) {
        self.insights = insights;
        self.recommendations = ordered_recommendations(&self.priority, &self.insights);
        self.updated_at = now;
    }

    /// Upgrades the report to a strictly higher tier, merging the new
    /// tier-specific sections over the existing content.
    ///
    /// Scores and insights flow forward by copy; nothing is recomputed.
    pub fn upgrade_to(
        &mut self,
        target: ReportTier,
        new_sections: TierSections,
        now: Timestamp,
    ) -> Result<(), ReportError> {
        if !self.tier.can_upgrade_to(target) {
            return Err(ReportError::not_an_upgrade(self.tier, target));
        }
        let new_fields = TierPayload {
            sections: new_sections,
            ..TierPayload::default()
        };
        let merged = merge_up_tier(&self.to_payload(), &new_fields);
        self.sections = merged.sections;
        self.tier = target;
        self.updated_at = now;
        Ok(())
    }

    /// Applies workbook edits to the tier sections: a provided section
    /// replaces the stored one, an absent section is left alone.
    ///
    /// Editability is the caller's concern; this only applies the content.
    pub fn edit_sections(&mut self, edits: TierSections, now: Timestamp) {
        self.sections = TierSections {
            persona: edits.persona.or(self.sections.persona.take()),
            messaging_framework: edits
                .messaging_framework
                .or(self.sections.messaging_framework.take()),
            audience_journey: edits
                .audience_journey
                .or(self.sections.audience_journey.take()),
        };
        self.updated_at = now;
    }

    /// Renders the report as a payload for merging or transmission.
    pub fn to_payload(&self) -> TierPayload {
        TierPayload {
            composite_score: Some(self.composite()),
            pillar_scores: Some(self.scores),
            pillar_insights: Some(self.insights.clone()),
            recommendations: Some(self.recommendations.clone()),
            primary_pillar: Some(self.priority.primary),
            context_coverage: Some(self.context_coverage),
            sections: self.sections.clone(),
        }
    }
}

/// Recommendations ordered by leverage: primary pillar first, then the
/// secondary pillars weakest-first.
fn ordered_recommendations(priority: &PillarPriority, insights: &PillarInsights) -> Vec<String> {
    let mut pillars: Vec<Pillar> = vec![priority.primary];
    pillars.extend(priority.secondary);
    pillars
        .into_iter()
        .map(|p| insights.get(p).recommendation.clone())
        .collect()
}
