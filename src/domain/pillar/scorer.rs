//! Pillar scoring over raw intake answers.
//!
//! Each pillar accumulates points from independent step-function checks on
//! the intake. Weights are additive and the per-pillar tables sum to exactly
//! 20, so clamping in [`PillarScore`] is a guard, not a normalizer. A missing
//! or unrecognized answer contributes zero; the scorer never errors.

use super::intake::{ClarityLevel, ConfidenceLevel, ConsistencyLevel, Intake};
use super::score::{PillarScore, PillarScores};
use super::stage::BrandStage;

// Positioning: 8 + 6 + 6 = 20
const W_OFFER_VERY_CLEAR: u8 = 8;
const W_OFFER_SOMEWHAT_CLEAR: u8 = 4;
const W_TARGET_CUSTOMERS: u8 = 6;
const W_COMPETITORS_MAPPED: u8 = 6;
const W_COMPETITORS_PARTIAL: u8 = 3;

// Messaging: 8 + 6 + 6 = 20
const W_MESSAGING_VERY_CLEAR: u8 = 8;
const W_MESSAGING_SOMEWHAT_CLEAR: u8 = 4;
const W_BRAND_VOICE: u8 = 6;
const W_ELEVATOR_PITCH: u8 = 6;

// Visibility: 7 + 7 + 4 + 2 = 20
const W_WEBSITE: u8 = 7;
const W_SOCIALS_MULTI: u8 = 7;
const W_SOCIALS_SINGLE: u8 = 3;
const W_CHANNELS_MULTI: u8 = 4;
const W_CHANNEL_AEO: u8 = 2;

// Credibility: 5 + 5 + 5 + 5 = 20
const W_BRAND_GUIDELINES: u8 = 5;
const W_CONSISTENCY_STRONG: u8 = 5;
const W_CONSISTENCY_MIXED: u8 = 2;
const W_VISUAL_VERY_CONFIDENT: u8 = 5;
const W_VISUAL_SOMEWHAT: u8 = 2;
const W_TESTIMONIALS_STRONG: u8 = 5;
const W_TESTIMONIALS_SOME: u8 = 2;

// Conversion: 7 + 7 + 6 = 20
const W_CLEAR_CTA: u8 = 7;
const W_TRACKS_CONVERSIONS: u8 = 7;
const W_LEAD_MAGNET: u8 = 6;

/// Scores all five pillars from the intake. Pure; no I/O.
pub fn score_pillars(intake: &Intake) -> PillarScores {
    PillarScores {
        positioning: PillarScore::new(score_positioning(intake)),
        messaging: PillarScore::new(score_messaging(intake)),
        visibility: PillarScore::new(score_visibility(intake)),
        credibility: PillarScore::new(score_credibility(intake)),
        conversion: PillarScore::new(score_conversion(intake)),
    }
}

fn score_positioning(intake: &Intake) -> u8 {
    let mut points = 0;
    points += match intake.offer_clarity {
        Some(ClarityLevel::VeryClear) => W_OFFER_VERY_CLEAR,
        Some(ClarityLevel::SomewhatClear) => W_OFFER_SOMEWHAT_CLEAR,
        _ => 0,
    };
    if Intake::present(&intake.target_customers) {
        points += W_TARGET_CUSTOMERS;
    }
    points += match intake.competitor_names.len() {
        0 => 0,
        1 => W_COMPETITORS_PARTIAL,
        _ => W_COMPETITORS_MAPPED,
    };
    points
}

fn score_messaging(intake: &Intake) -> u8 {
    let mut points = 0;
    points += match intake.messaging_clarity {
        Some(ClarityLevel::VeryClear) => W_MESSAGING_VERY_CLEAR,
        Some(ClarityLevel::SomewhatClear) => W_MESSAGING_SOMEWHAT_CLEAR,
        _ => 0,
    };
    if Intake::present(&intake.brand_voice_description) {
        points += W_BRAND_VOICE;
    }
    if Intake::present(&intake.elevator_pitch) {
        points += W_ELEVATOR_PITCH;
    }
    points
}

fn score_visibility(intake: &Intake) -> u8 {
    let mut points = 0;
    if Intake::present(&intake.website_url) {
        points += W_WEBSITE;
    }
    points += match intake.social_profiles.len() {
        0 => 0,
        1 => W_SOCIALS_SINGLE,
        _ => W_SOCIALS_MULTI,
    };
    if intake.channel_count() >= 2 {
        points += W_CHANNELS_MULTI;
    }
    if intake
        .marketing_channels
        .iter()
        .any(|c| c.trim().eq_ignore_ascii_case("aeo"))
    {
        points += W_CHANNEL_AEO;
    }
    points
}

fn score_credibility(intake: &Intake) -> u8 {
    let mut points = 0;
    if intake.has_brand_guidelines == Some(true) {
        points += W_BRAND_GUIDELINES;
    }
    points += match intake.brand_consistency {
        Some(ConsistencyLevel::Strong) => W_CONSISTENCY_STRONG,
        Some(ConsistencyLevel::Mixed) => W_CONSISTENCY_MIXED,
        _ => 0,
    };
    points += match intake.visual_confidence {
        Some(ConfidenceLevel::VeryConfident) => W_VISUAL_VERY_CONFIDENT,
        Some(ConfidenceLevel::SomewhatConfident) => W_VISUAL_SOMEWHAT,
        _ => 0,
    };
    points += match intake.testimonial_count {
        Some(n) if n >= 3 => W_TESTIMONIALS_STRONG,
        Some(n) if n >= 1 => W_TESTIMONIALS_SOME,
        _ => 0,
    };
    points
}

fn score_conversion(intake: &Intake) -> u8 {
    let mut points = 0;
    if intake.has_clear_cta == Some(true) {
        points += W_CLEAR_CTA;
    }
    if intake.tracks_conversions == Some(true) {
        points += W_TRACKS_CONVERSIONS;
    }
    if Intake::present(&intake.lead_magnet) {
        points += W_LEAD_MAGNET;
    }
    points
}

/// Derives the brand maturity stage from the intake. Pure; no I/O.
///
/// Fewer than two years in business or at most one marketing channel means
/// Early; two to five years means Scaling; otherwise Established. A missing
/// years answer is treated as zero.
pub fn detect_stage(intake: &Intake) -> BrandStage {
    let years = intake.years_in_business.unwrap_or(0);
    if years < 2 || intake.channel_count() <= 1 {
        BrandStage::Early
    } else if years <= 5 {
        BrandStage::Scaling
    } else {
        BrandStage::Established
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pillar::Pillar;

    fn full_intake() -> Intake {
        Intake {
            offer_clarity: Some(ClarityLevel::VeryClear),
            target_customers: Some("B2B founders".into()),
            competitor_names: vec!["Acme".into(), "Globex".into()],
            messaging_clarity: Some(ClarityLevel::VeryClear),
            brand_voice_description: Some("warm, direct".into()),
            elevator_pitch: Some("We do X for Y".into()),
            website_url: Some("https://example.com".into()),
            social_profiles: vec!["linkedin".into(), "instagram".into()],
            marketing_channels: vec!["SEO".into(), "AEO".into()],
            has_brand_guidelines: Some(true),
            brand_consistency: Some(ConsistencyLevel::Strong),
            visual_confidence: Some(ConfidenceLevel::VeryConfident),
            testimonial_count: Some(5),
            has_clear_cta: Some(true),
            tracks_conversions: Some(true),
            lead_magnet: Some("Brand audit checklist".into()),
            years_in_business: Some(4),
            business_name: Some("Example Co".into()),
            industry: Some("consulting".into()),
        }
    }

    #[test]
    fn empty_intake_scores_zero_everywhere() {
        let scores = score_pillars(&Intake::default());
        for (_, score) in scores.iter() {
            assert_eq!(score.value(), 0);
        }
        assert_eq!(scores.composite(), 0);
    }

    #[test]
    fn full_intake_maxes_every_pillar() {
        let scores = score_pillars(&full_intake());
        for (pillar, score) in scores.iter() {
            assert_eq!(score.value(), 20, "pillar {} not maxed", pillar);
        }
        assert_eq!(scores.composite(), 100);
    }

    #[test]
    fn partial_clarity_earns_partial_credit() {
        let intake = Intake {
            offer_clarity: Some(ClarityLevel::SomewhatClear),
            ..Intake::default()
        };
        assert_eq!(score_pillars(&intake).positioning.value(), 4);
    }

    #[test]
    fn unclear_answers_earn_nothing() {
        let intake = Intake {
            offer_clarity: Some(ClarityLevel::Unclear),
            messaging_clarity: Some(ClarityLevel::Unknown),
            ..Intake::default()
        };
        let scores = score_pillars(&intake);
        assert_eq!(scores.positioning.value(), 0);
        assert_eq!(scores.messaging.value(), 0);
    }

    #[test]
    fn single_competitor_earns_partial_credit() {
        let intake = Intake {
            competitor_names: vec!["Acme".into()],
            ..Intake::default()
        };
        assert_eq!(score_pillars(&intake).positioning.value(), 3);
    }

    #[test]
    fn aeo_channel_is_matched_case_insensitively() {
        let intake = Intake {
            marketing_channels: vec!["aeo".into()],
            ..Intake::default()
        };
        assert_eq!(score_pillars(&intake).visibility.value(), 2);
    }

    #[test]
    fn spec_scenario_primary_is_conversion() {
        // Intake from the product's reference scenario: strong answers across
        // positioning, messaging, visibility, and credibility, nothing for
        // conversion checks.
        let intake = Intake {
            offer_clarity: Some(ClarityLevel::VeryClear),
            target_customers: Some("independent consultants".into()),
            competitor_names: vec!["North".into(), "South".into()],
            messaging_clarity: Some(ClarityLevel::VeryClear),
            brand_voice_description: Some("confident, plain-spoken".into()),
            website_url: Some("https://brand.example".into()),
            social_profiles: vec!["linkedin".into(), "youtube".into()],
            marketing_channels: vec!["SEO".into(), "AEO".into()],
            has_brand_guidelines: Some(true),
            brand_consistency: Some(ConsistencyLevel::Strong),
            visual_confidence: Some(ConfidenceLevel::VeryConfident),
            ..Intake::default()
        };
        let scores = score_pillars(&intake);
        assert_eq!(scores.positioning.value(), 20);
        assert_eq!(scores.visibility.value(), 20);
        assert!(scores.messaging.value() >= 14);
        assert!(scores.credibility.value() >= 15);

        // Conversion has the lowest individual total under the weight table.
        let lowest = Pillar::ALL
            .into_iter()
            .min_by_key(|p| scores.get(*p))
            .unwrap();
        assert_eq!(lowest, Pillar::Conversion);
    }

    #[test]
    fn stage_is_early_under_two_years() {
        let intake = Intake {
            years_in_business: Some(1),
            marketing_channels: vec!["SEO".into(), "email".into()],
            ..Intake::default()
        };
        assert_eq!(detect_stage(&intake), BrandStage::Early);
    }

    #[test]
    fn stage_is_early_with_single_channel_regardless_of_age() {
        let intake = Intake {
            years_in_business: Some(10),
            marketing_channels: vec!["SEO".into()],
            ..Intake::default()
        };
        assert_eq!(detect_stage(&intake), BrandStage::Early);
    }

    #[test]
    fn stage_is_scaling_between_two_and_five_years() {
        for years in [2, 3, 5] {
            let intake = Intake {
                years_in_business: Some(years),
                marketing_channels: vec!["SEO".into(), "email".into()],
                ..Intake::default()
            };
            assert_eq!(detect_stage(&intake), BrandStage::Scaling, "years={}", years);
        }
    }

    #[test]
    fn stage_is_established_past_five_years() {
        let intake = Intake {
            years_in_business: Some(6),
            marketing_channels: vec!["SEO".into(), "email".into()],
            ..Intake::default()
        };
        assert_eq!(detect_stage(&intake), BrandStage::Established);
    }

    #[test]
    fn missing_years_defaults_to_early() {
        let intake = Intake {
            marketing_channels: vec!["SEO".into(), "email".into()],
            ..Intake::default()
        };
        assert_eq!(detect_stage(&intake), BrandStage::Early);
    }
}
