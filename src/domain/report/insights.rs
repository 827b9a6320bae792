//! Deterministic per-pillar insight text.
//!
//! These templates are the guaranteed floor for report prose. The AI
//! augmenter may replace them with business-specific text, but a report can
//! never ship without insight text, so the templates are generated first and
//! only ever overwritten by a validated augmentation.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::pillar::{BrandStage, Pillar, PillarScore, PillarScores};

/// Insight and recommendation text for one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarInsight {
    pub insight: String,
    pub recommendation: String,
}

/// Insight text for all five pillars, always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarInsights {
    pub positioning: PillarInsight,
    pub messaging: PillarInsight,
    pub visibility: PillarInsight,
    pub credibility: PillarInsight,
    pub conversion: PillarInsight,
}

impl PillarInsights {
    /// Returns the insight for a pillar.
    pub fn get(&self, pillar: Pillar) -> &PillarInsight {
        match pillar {
            Pillar::Positioning => &self.positioning,
            Pillar::Messaging => &self.messaging,
            Pillar::Visibility => &self.visibility,
            Pillar::Credibility => &self.credibility,
            Pillar::Conversion => &self.conversion,
        }
    }

    /// Replaces the insight for a pillar.
    pub fn set(&mut self, pillar: Pillar, insight: PillarInsight) {
        match pillar {
            Pillar::Positioning => self.positioning = insight,
            Pillar::Messaging => self.messaging = insight,
            Pillar::Visibility => self.visibility = insight,
            Pillar::Credibility => self.credibility = insight,
            Pillar::Conversion => self.conversion = insight,
        }
    }
}

/// Score band used to select template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ScoreBand {
    Weak,
    Developing,
    Strong,
}

impl ScoreBand {
    fn from_score(score: PillarScore) -> Self {
        match score.value() {
            0..=7 => ScoreBand::Weak,
            8..=14 => ScoreBand::Developing,
            _ => ScoreBand::Strong,
        }
    }
}

static TEMPLATES: Lazy<HashMap<(Pillar, ScoreBand), (&'static str, &'static str)>> =
    Lazy::new(|| {
        use Pillar::*;
        use ScoreBand::*;
        let mut m = HashMap::new();
        m.insert((Positioning, Weak), (
            "Your market position is undefined; prospects cannot tell what makes you the right choice.",
            "Write a one-sentence positioning statement naming who you serve and why you win.",
        ));
        m.insert((Positioning, Developing), (
            "Your positioning is taking shape but still overlaps with competitors in places.",
            "Sharpen the offer description until a stranger can repeat it back accurately.",
        ));
        m.insert((Positioning, Strong), (
            "Your position is distinct and clearly stated; prospects know where you fit.",
            "Pressure-test the positioning against your two closest competitors each quarter.",
        ));
        m.insert((Messaging, Weak), (
            "Your core message changes from page to page, which forces buyers to do the translation work.",
            "Draft a message hierarchy: one core promise, three proof points, one call to action.",
        ));
        m.insert((Messaging, Developing), (
            "Your message is mostly consistent but the brand voice is not yet documented.",
            "Capture the brand voice in a short guide so every channel sounds like the same company.",
        ));
        m.insert((Messaging, Strong), (
            "Your messaging is consistent and your voice is recognizable across channels.",
            "Refresh proof points twice a year so the strong message stays current.",
        ));
        m.insert((Visibility, Weak), (
            "Buyers searching for what you do are unlikely to find you today.",
            "Stand up a basic web presence and pick two channels you can sustain weekly.",
        ));
        m.insert((Visibility, Developing), (
            "You are findable in some channels but coverage is thin where buyers actually look.",
            "Double down on the single channel that already sends you the most qualified traffic.",
        ));
        m.insert((Visibility, Strong), (
            "You show up consistently where your audience searches and browses.",
            "Add answer-engine coverage so assistants cite you, not just search engines.",
        ));
        m.insert((Credibility, Weak), (
            "There is little third-party evidence backing your claims, so trust is built slowly.",
            "Collect three customer testimonials this month and place them beside every offer.",
        ));
        m.insert((Credibility, Developing), (
            "You have some proof, but inconsistent presentation undercuts it.",
            "Adopt simple brand guidelines and apply them to your top five touchpoints.",
        ));
        m.insert((Credibility, Strong), (
            "Your brand presents consistently and carries visible social proof.",
            "Keep the proof fresh: rotate in a recent result or testimonial every quarter.",
        ));
        m.insert((Conversion, Weak), (
            "Attention is arriving but nothing is reliably turning it into enquiries.",
            "Put one clear call to action on every page and measure it weekly.",
        ));
        m.insert((Conversion, Developing), (
            "Your funnel converts, but untracked steps hide where buyers drop off.",
            "Instrument the two steps between first visit and enquiry before optimizing anything.",
        ));
        m.insert((Conversion, Strong), (
            "Your touchpoints convert well and you can see where the numbers come from.",
            "Run one conversion experiment per month against your weakest page.",
        ));
        m
    });

/// Generates the deterministic insight set for a score breakdown.
///
/// The stage only flavors the recommendation for early brands; template
/// selection is driven by the per-pillar score band.
pub fn template_insights(scores: &PillarScores, stage: BrandStage) -> PillarInsights {
    let build = |pillar: Pillar| {
        let band = ScoreBand::from_score(scores.get(pillar));
        let (insight, recommendation) = TEMPLATES
            .get(&(pillar, band))
            .copied()
            .unwrap_or(("", ""));
        let recommendation = if stage == BrandStage::Early && band == ScoreBand::Weak {
            format!("{} Start small: this matters more than polish at your stage.", recommendation)
        } else {
            recommendation.to_string()
        };
        PillarInsight {
            insight: insight.to_string(),
            recommendation,
        }
    };

    PillarInsights {
        positioning: build(Pillar::Positioning),
        messaging: build(Pillar::Messaging),
        visibility: build(Pillar::Visibility),
        credibility: build(Pillar::Credibility),
        conversion: build(Pillar::Conversion),
    }
}
