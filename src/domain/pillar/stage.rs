//! Brand maturity stage.

use serde::{Deserialize, Serialize};

/// Coarse brand-maturity label, derived once per intake.
///
/// The stage is computed at report generation and never re-derived during
/// refinement; it colors report copy, not scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandStage {
    /// Under two years in business, or a single marketing channel.
    Early,
    /// Two to five years in business.
    Scaling,
    /// More than five years in business.
    Established,
}

impl BrandStage {
    /// Returns the display name for this stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            BrandStage::Early => "Early",
            BrandStage::Scaling => "Scaling",
            BrandStage::Established => "Established",
        }
    }
}

impl std::fmt::Display for BrandStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
