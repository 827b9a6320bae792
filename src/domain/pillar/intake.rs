//! Raw intake answers collected before scoring.
//!
//! Every field is optional. The scorer treats a missing or unrecognized
//! answer as "check not satisfied" and awards zero points for it; intake
//! parsing must never fail a report generation.

use serde::{Deserialize, Serialize};

/// Three-level clarity answer used by several intake questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarityLevel {
    VeryClear,
    SomewhatClear,
    Unclear,
    /// Any unrecognized answer. Never scores.
    #[serde(other)]
    Unknown,
}

/// How consistently the brand shows up across touchpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    Strong,
    Mixed,
    Weak,
    #[serde(other)]
    Unknown,
}

/// Confidence in the brand's visual presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryConfident,
    SomewhatConfident,
    NotConfident,
    #[serde(other)]
    Unknown,
}

/// The raw intake as submitted by the customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Intake {
    // Positioning
    pub offer_clarity: Option<ClarityLevel>,
    pub target_customers: Option<String>,
    pub competitor_names: Vec<String>,

    // Messaging
    pub messaging_clarity: Option<ClarityLevel>,
    pub brand_voice_description: Option<String>,
    pub elevator_pitch: Option<String>,

    // Visibility
    pub website_url: Option<String>,
    pub social_profiles: Vec<String>,
    pub marketing_channels: Vec<String>,

    // Credibility
    pub has_brand_guidelines: Option<bool>,
    pub brand_consistency: Option<ConsistencyLevel>,
    pub visual_confidence: Option<ConfidenceLevel>,
    pub testimonial_count: Option<u32>,

    // Conversion
    pub has_clear_cta: Option<bool>,
    pub tracks_conversions: Option<bool>,
    pub lead_magnet: Option<String>,

    // Stage detection
    pub years_in_business: Option<u32>,

    // Context for prose generation
    pub business_name: Option<String>,
    pub industry: Option<String>,
}

impl Intake {
    /// True when the optional string holds a non-blank value.
    pub(crate) fn present(field: &Option<String>) -> bool {
        field.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false)
    }

    /// Number of distinct marketing channels listed.
    pub fn channel_count(&self) -> usize {
        self.marketing_channels
            .iter()
            .filter(|c| !c.trim().is_empty())
            .count()
    }

    /// Fraction of intake questions answered, as a 0-100 percentage.
    ///
    /// Carried onto the report as "context coverage" and copied forward by
    /// the tier merger, never recomputed.
    pub fn context_coverage(&self) -> u8 {
        let answered = [
            self.offer_clarity.is_some(),
            Self::present(&self.target_customers),
            !self.competitor_names.is_empty(),
            self.messaging_clarity.is_some(),
            Self::present(&self.brand_voice_description),
            Self::present(&self.elevator_pitch),
            Self::present(&self.website_url),
            !self.social_profiles.is_empty(),
            !self.marketing_channels.is_empty(),
            self.has_brand_guidelines.is_some(),
            self.brand_consistency.is_some(),
            self.visual_confidence.is_some(),
            self.testimonial_count.is_some(),
            self.has_clear_cta.is_some(),
            self.tracks_conversions.is_some(),
            Self::present(&self.lead_magnet),
            self.years_in_business.is_some(),
            Self::present(&self.business_name),
            Self::present(&self.industry),
        ];
        let total = answered.len() as u32;
        let filled = answered.iter().filter(|a| **a).count() as u32;
        ((filled * 100) / total) as u8
    }
}
