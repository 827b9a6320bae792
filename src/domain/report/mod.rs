//! Reports: the diagnostic deliverable and its tier progression.

mod aggregate;
mod errors;
mod insights;
mod merger;
mod tier;

pub use aggregate::{Report, ScoreSnapshot, ScoreSource};
pub use errors::ReportError;
pub use insights::{template_insights, PillarInsight, PillarInsights};
pub use merger::{
    merge_up_tier, JourneySection, MessagingSection, PersonaSection, TierPayload, TierSections,
};
pub use tier::ReportTier;
