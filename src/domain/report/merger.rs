//! Tier content merging.
//!
//! Higher-tier reports are built by copying the customer's already-computed
//! lower-tier content forward and layering tier-specific sections on top.
//! Scores are computed exactly once, at initial generation; merging never
//! recomputes anything and never replaces a present field with a default.

use serde::{Deserialize, Serialize};

use crate::domain::pillar::{Pillar, PillarScores};

use super::insights::PillarInsights;

/// Persona and archetype content added at Snapshot+.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaSection {
    pub archetype: String,
    pub persona_summary: String,
    pub audience_traits: Vec<String>,
}

/// Messaging framework content added at Blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingSection {
    pub messaging_pillars: Vec<String>,
    pub tone_of_voice: String,
}

/// Audience journey content added at Blueprint+.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySection {
    pub journey_stages: Vec<String>,
    pub content_roadmap: Vec<String>,
}

/// The tier-specific sections a report can carry.
///
///// Sections accumulate as tiers rise: a Blueprint+ report carries all three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSections {
    pub persona: Option<PersonaSection>,
    pub messaging_framework: Option<MessagingSection>,
    pub audience_journey: Option<JourneySection>,
}

/// A report payload as stored or transmitted, with every field optional.
///
/// This is the merger's working shape: a field that the lower tier never
/// produced is simply absent and stays absent rather than becoming a
/// default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierPayload {
    // Foundation fields, computed once at initial generation.
    pub composite_score: Option<u8>,
    pub pillar_scores: Option<PillarScores>,
    pub pillar_insights: Option<PillarInsights>,
    pub recommendations: Option<Vec<String>>,
    pub primary_pillar: Option<Pillar>,
    pub context_coverage: Option<u8>,

    // Tier-specific sections.
    pub sections: TierSections,
}

/// Merges a lower tier's payload into a higher tier's new content.
///
/// Foundation fields are copied forward if and only if the lower payload
/// provides them; the lower value always wins because scores flow forward by
/// copy, never by recomputation. Tier-specific sections prefer the new
/// content and fall back to whatever the lower tier already carried. The
/// merge is a pure function and therefore idempotent: merging the same
/// inputs twice yields the same output.
pub fn merge_up_tier(lower: &TierPayload, new_fields: &TierPayload) -> TierPayload {
    TierPayload {
        composite_score: lower.composite_score.or(new_fields.composite_score),
        pillar_scores: lower.pillar_scores.or(new_fields.pillar_scores),
        pillar_insights: lower
            .pillar_insights
            .clone()
            .or_else(|| new_fields.pillar_insights.clone()),
        recommendations: lower
            .recommendations
            .clone()
            .or_else(|| new_fields.recommendations.clone()),
        primary_pillar: lower.primary_pillar.or(new_fields.primary_pillar),
        context_coverage: lower.context_coverage.or(new_fields.context_coverage),
        sections: TierSections {
            persona: new_fields
                .sections
                .persona
                .clone()
                .or_else(|| lower.sections.persona.clone()),
            messaging_framework: new_fields
                .sections
                .messaging_framework
                .clone()
                .or_else(|| lower.sections.messaging_framework.clone()),
            audience_journey: new_fields
                .sections
                .audience_journey
                .clone()
                .or_else(|| lower.sections.audience_journey.clone()),
        },
    }
}
