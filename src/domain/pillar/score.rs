//! Pillar score value objects.

use serde::{Deserialize, Serialize};

use super::Pillar;

/// Maximum score a single pillar can reach.
pub const MAX_PILLAR_SCORE: u8 = 20;

/// A single pillar's score, always within [0, 20].
///
/// Construction clamps rather than errors: the weight table is designed so
/// sums cannot exceed 20, but the invariant is enforced here regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PillarScore(u8);

impl PillarScore {
    /// Creates a score, clamping to [0, 20].
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_PILLAR_SCORE))
    }

    /// Creates a zero score.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for PillarScore {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

/// The complete set of five pillar scores.
///
/// All five pillars are always present by construction; the struct form
/// makes a missing key unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScores {
    pub positioning: PillarScore,
    pub messaging: PillarScore,
    pub visibility: PillarScore,
    pub credibility: PillarScore,
    pub conversion: PillarScore,
}

impl PillarScores {
    /// Creates a score set with every pillar at zero.
    pub fn zero() -> Self {
        Self {
            positioning: PillarScore::zero(),
            messaging: PillarScore::zero(),
            visibility: PillarScore::zero(),
            credibility: PillarScore::zero(),
            conversion: PillarScore::zero(),
        }
    }

    /// Returns the score for a pillar.
    pub fn get(&self, pillar: Pillar) -> PillarScore {
        match pillar {
            Pillar::Positioning => self.positioning,
            Pillar::Messaging => self.messaging,
            Pillar::Visibility => self.visibility,
            Pillar::Credibility => self.credibility,
            Pillar::Conversion => self.conversion,
        }
    }

    /// Sets the score for a pillar.
    pub fn set(&mut self, pillar: Pillar, score: PillarScore) {
        match pillar {
            Pillar::Positioning => self.positioning = score,
            Pillar::Messaging => self.messaging = score,
            Pillar::Visibility => self.visibility = score,
            Pillar::Credibility => self.credibility = score,
            Pillar::Conversion => self.conversion = score,
        }
    }

    /// Iterates pillars with their scores in fixed precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (Pillar, PillarScore)> + '_ {
        Pillar::ALL.iter().map(move |&p| (p, self.get(p)))
    }

    /// The canonical 0-100 composite score: the sum of the five pillar scores.
    ///
    /// This is the only composite formula in the codebase. It is applied both
    /// at initial generation and when scores are recomputed after refinement,
    /// so a report's composite never drifts between views.
    pub fn composite(&self) -> u8 {
        self.iter().map(|(_, s)| s.value()).sum()
    }
}
