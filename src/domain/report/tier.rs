//! Report tier definitions.
//!
//! The four purchasable report depths form a fixed, strictly ordered set.

use serde::{Deserialize, Serialize};

/// A purchasable report tier.
///
/// Rank determines upgrade direction: a customer can only upgrade to a tier
/// strictly above every tier they already hold. Refresh products sit outside
/// this enum and carry rank 0, same as Snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTier {
    /// The entry diagnostic report.
    Snapshot,
    /// Snapshot plus persona and archetype sections.
    SnapshotPlus,
    /// Full strategy blueprint with messaging framework.
    Blueprint,
    /// Blueprint plus audience journey and content roadmap; its workbook is
    /// permanently editable.
    BlueprintPlus,
}

impl ReportTier {
    /// All tiers in ascending rank order.
    pub const ALL: [ReportTier; 4] = [
        ReportTier::Snapshot,
        ReportTier::SnapshotPlus,
        ReportTier::Blueprint,
        ReportTier::BlueprintPlus,
    ];

    /// Returns the numeric rank of this tier for upgrade comparison.
    pub fn rank(&self) -> u8 {
        match self {
            ReportTier::Snapshot => 0,
            ReportTier::SnapshotPlus => 1,
            ReportTier::Blueprint => 2,
            ReportTier::BlueprintPlus => 3,
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportTier::Snapshot => "Snapshot",
            ReportTier::SnapshotPlus => "Snapshot+",
            ReportTier::Blueprint => "Blueprint",
            ReportTier::BlueprintPlus => "Blueprint+",
        }
    }

    /// Returns the key used in serialized payloads and database columns.
    pub fn key(&self) -> &'static str {
        match self {
            ReportTier::Snapshot => "snapshot",
            ReportTier::SnapshotPlus => "snapshot_plus",
            ReportTier::Blueprint => "blueprint",
            ReportTier::BlueprintPlus => "blueprint_plus",
        }
    }

    /// True when `target` is a valid upgrade from this tier.
    pub fn can_upgrade_to(&self, target: ReportTier) -> bool {
        target.rank() > self.rank()
    }

    /// True for the tier whose workbook never finalizes.
    pub fn is_permanently_editable(&self) -> bool {
        matches!(self, ReportTier::BlueprintPlus)
    }
}

impl std::fmt::Display for ReportTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
