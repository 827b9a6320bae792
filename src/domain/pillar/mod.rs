//! Pillar scoring: the five brand-health dimensions and their resolution.

mod intake;
#[allow(clippy::module_inception)]
mod pillar;
mod priority;
mod score;
mod scorer;
mod stage;

pub use intake::{ClarityLevel, ConfidenceLevel, ConsistencyLevel, Intake};
pub use pillar::Pillar;
pub use priority::{resolve_priority, PillarPriority};
pub use score::{PillarScore, PillarScores, MAX_PILLAR_SCORE};
pub use scorer::{detect_stage, score_pillars};
pub use stage::BrandStage;
