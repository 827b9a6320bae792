//! AI insight augmentation.
//!
//! A decorator over the deterministic template insights: on success the
//! provider's business-specific prose replaces the templates pillar by
//! pillar, and on any failure the templates stand. Report generation never
//! hard-fails because of the text provider.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::pillar::Pillar;
use crate::domain::report::{PillarInsight, PillarInsights, Report};
use crate::ports::{GenerationRequest, Message, TextGenerator};

/// Minimum pillars that must carry usable text before a provider response
/// is accepted at all.
const MIN_USABLE_PILLARS: usize = 3;

/// Raw per-pillar entry as the provider is asked to produce it.
#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    insight: Option<String>,
    recommendation: Option<String>,
}

impl RawEntry {
    fn usable(&self) -> Option<PillarInsight> {
        let insight = self.insight.as_deref()?.trim();
        let recommendation = self.recommendation.as_deref()?.trim();
        if insight.is_empty() || recommendation.is_empty() {
            return None;
        }
        Some(PillarInsight {
            insight: insight.to_string(),
            recommendation: recommendation.to_string(),
        })
    }
}

/// Raw provider response: one entry per pillar key, all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResponse {
    positioning: RawEntry,
    messaging: RawEntry,
    visibility: RawEntry,
    credibility: RawEntry,
    conversion: RawEntry,
}

/// Upgrades template insights into business-specific prose, bounded by a
/// hard timeout.
pub struct InsightAugmenter {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    max_tokens: u32,
}

impl InsightAugmenter {
    /// Creates an augmenter over a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>, timeout_secs: u32, max_tokens: u32) -> Self {
        Self {
            generator,
            timeout: Duration::from_secs(u64::from(timeout_secs)),
            max_tokens,
        }
    }

    /// Attempts to augment the report's insights.
    ///
    /// The provider call races the configured timeout; dropping the losing
    /// future cancels it cooperatively, so a slow response is discarded and
    /// never written anywhere. Returns `None` on timeout, provider error,
    /// malformed JSON, or fewer than three usable pillars - the caller keeps
    /// the deterministic templates in every one of those cases.
    pub async fn augment(&self, report: &Report) -> Option<PillarInsights> {
        let request = self.build_request(report);

        let text = match tokio::time::timeout(self.timeout, self.generator.generate(request)).await
        {
            Err(_) => {
                warn!(
                    provider = self.generator.provider_name(),
                    timeout_secs = self.timeout.as_secs(),
                    "insight augmentation timed out; keeping template insights"
                );
                return None;
            }
            Ok(Err(err)) => {
                warn!(
                    provider = self.generator.provider_name(),
                    error = %err,
                    "insight augmentation failed; keeping template insights"
                );
                return None;
            }
            Ok(Ok(text)) => text,
        };

        match parse_response(&text, &report.insights) {
            Some(insights) => Some(insights),
            None => {
                warn!(
                    provider = self.generator.provider_name(),
                    "augmentation response unusable; keeping template insights"
                );
                None
            }
        }
    }

    fn build_request(&self, report: &Report) -> GenerationRequest {
        let scores: Vec<String> = report
            .scores
            .iter()
            .map(|(pillar, score)| format!("{}: {}/20", pillar.key(), score.value()))
            .collect();
        let context = format!(
            "Composite score: {}/100\nStage: {}\nPrimary opportunity: {}\nContext coverage: {}%\nPillar scores:\n{}",
            report.composite(),
            report.stage,
            report.priority.primary.key(),
            report.context_coverage,
            scores.join("\n"),
        );

        GenerationRequest::new()
            .with_message(Message::system(
                "You are a brand strategist. Given a diagnostic score breakdown, write one \
                 specific insight and one actionable recommendation per pillar. Respond with \
                 only a JSON object keyed by pillar name (positioning, messaging, visibility, \
                 credibility, conversion), each value an object with \"insight\" and \
                 \"recommendation\" strings.",
            ))
            .with_message(Message::user(context))
            .with_max_tokens(self.max_tokens)
            .with_temperature(0.4)
    }
}

/// Parses a provider response against the template baseline.
///
/// Accepts only if at least three pillars carry usable text; usable pillars
/// replace their templates, the rest keep them.
fn parse_response(text: &str, baseline: &PillarInsights) -> Option<PillarInsights> {
    let raw: RawResponse = serde_json::from_str(strip_code_fence(text)).ok()?;

    let entries = [
        (&raw.positioning, Pillar::Positioning),
        (&raw.messaging, Pillar::Messaging),
        (&raw.visibility, Pillar::Visibility),
        (&raw.credibility, Pillar::Credibility),
        (&raw.conversion, Pillar::Conversion),
    ];

    let usable: Vec<_> = entries
        .iter()
        .filter_map(|(entry, pillar)| entry.usable().map(|i| (*pillar, i)))
        .collect();

    if usable.len() < MIN_USABLE_PILLARS {
        debug!(usable = usable.len(), "too few usable pillars in augmentation");
        return None;
    }

    let mut insights = baseline.clone();
    for (pillar, insight) in usable {
        insights.set(pillar, insight);
    }
    Some(insights)
}

/// Providers sometimes wrap JSON in a markdown code fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pillar::{BrandStage, Pillar, PillarScores};
    use crate::domain::report::template_insights;

    fn baseline() -> PillarInsights {
        template_insights(&PillarScores::zero(), BrandStage::Early)
    }

    fn entry(pillar: &str) -> String {
        format!(
            r#""{}": {{"insight": "{} insight", "recommendation": "{} action"}}"#,
            pillar, pillar, pillar
        )
    }

    #[test]
    fn response_with_all_pillars_replaces_everything() {
        let json = format!(
            "{{ {}, {}, {}, {}, {} }}",
            entry("positioning"),
            entry("messaging"),
            entry("visibility"),
            entry("credibility"),
            entry("conversion")
        );
        let insights = parse_response(&json, &baseline()).unwrap();
        assert_eq!(insights.get(Pillar::Conversion).insight, "conversion insight");
    }

    #[test]
    fn three_usable_pillars_is_accepted_with_templates_for_the_rest() {
        let json = format!(
            "{{ {}, {}, {} }}",
            entry("positioning"),
            entry("messaging"),
            entry("visibility")
        );
        let base = baseline();
        let insights = parse_response(&json, &base).unwrap();
        assert_eq!(insights.get(Pillar::Positioning).insight, "positioning insight");
        // Unusable pillars keep the deterministic text.
        assert_eq!(insights.get(Pillar::Conversion), base.get(Pillar::Conversion));
    }

    #[test]
    fn two_usable_pillars_discards_the_whole_response() {
        let json = format!("{{ {}, {} }}", entry("positioning"), entry("messaging"));
        assert!(parse_response(&json, &baseline()).is_none());
    }

    #[test]
    fn blank_strings_do_not_count_as_usable() {
        let json = format!(
            r#"{{ {}, {}, "visibility": {{"insight": "  ", "recommendation": "x"}} }}"#,
            entry("positioning"),
            entry("messaging")
        );
        assert!(parse_response(&json, &baseline()).is_none());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(parse_response("not json at all", &baseline()).is_none());
    }

    #[test]
    fn code_fenced_json_is_unwrapped() {
        let json = format!(
            "```json\n{{ {}, {}, {} }}\n```",
            entry("positioning"),
            entry("messaging"),
            entry("credibility")
        );
        assert!(parse_response(&json, &baseline()).is_some());
    }
}
