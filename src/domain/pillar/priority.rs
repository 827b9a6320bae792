//! Pillar priority resolution.
//!
//! The weakest pillar is the customer's highest-leverage opportunity: a low
//! score means the most room to improve, which is the framing used across
//! the product.

use serde::{Deserialize, Serialize};

use super::score::PillarScores;
use super::Pillar;

/// Resolved pillar priority for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarPriority {
    /// The weakest pillar; the report leads with it.
    pub primary: Pillar,
    /// The remaining four pillars, weakest first.
    pub secondary: [Pillar; 4],
}

/// Resolves the primary and secondary pillars from a score set.
///
/// Ties are broken by the fixed precedence order `positioning > messaging >
/// visibility > credibility > conversion`, for both the primary pick and the
/// secondary ordering. The resolution is fully deterministic: identical
/// scores always produce identical output.
pub fn resolve_priority(scores: &PillarScores) -> PillarPriority {
    let mut ranked: Vec<Pillar> = Pillar::ALL.to_vec();
    // Sort by (score, precedence); the sort is stable but the explicit
    // precedence key keeps the tie-break rule independent of input order.
    ranked.sort_by_key(|p| (scores.get(*p), p.precedence()));

    let primary = ranked[0];
    let secondary = [ranked[1], ranked[2], ranked[3], ranked[4]];
    PillarPriority { primary, secondary }
}
