//! The five brand-health pillars.

use serde::{Deserialize, Serialize};

/// One of the five fixed brand-health dimensions.
///
/// The declaration order is also the fixed precedence order used to break
/// score ties during priority resolution: positioning outranks messaging,
/// messaging outranks visibility, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    /// How clearly the business occupies a distinct market position.
    Positioning,
    /// How clearly the business communicates its value.
    Messaging,
    /// How discoverable the business is across channels.
    Visibility,
    /// How much trust signals back the brand up.
    Credibility,
    /// How well brand touchpoints turn attention into action.
    Conversion,
}

impl Pillar {
    /// All five pillars in fixed precedence order.
    pub const ALL: [Pillar; 5] = [
        Pillar::Positioning,
        Pillar::Messaging,
        Pillar::Visibility,
        Pillar::Credibility,
        Pillar::Conversion,
    ];

    /// Returns the display name for this pillar.
    pub fn display_name(&self) -> &'static str {
        match self {
            Pillar::Positioning => "Positioning",
            Pillar::Messaging => "Messaging",
            Pillar::Visibility => "Visibility",
            Pillar::Credibility => "Credibility",
            Pillar::Conversion => "Conversion",
        }
    }

    /// Returns the key used in serialized payloads and database columns.
    pub fn key(&self) -> &'static str {
        match self {
            Pillar::Positioning => "positioning",
            Pillar::Messaging => "messaging",
            Pillar::Visibility => "visibility",
            Pillar::Credibility => "credibility",
            Pillar::Conversion => "conversion",
        }
    }

    /// Position in the fixed precedence order (0 = highest precedence).
    pub fn precedence(&self) -> usize {
        Pillar::ALL
            .iter()
            .position(|p| p == self)
            .unwrap_or(Pillar::ALL.len())
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_five_distinct_pillars() {
        let mut keys: Vec<_> = Pillar::ALL.iter().map(|p| p.key()).collect();
        keys.dedup();
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn precedence_follows_declaration_order() {
        assert_eq!(Pillar::Positioning.precedence(), 0);
        assert_eq!(Pillar::Conversion.precedence(), 4);
    }

    #[test]
    fn pillar_serializes_lowercase() {
        let json = serde_json::to_string(&Pillar::Credibility).unwrap();
        assert_eq!(json, "\"credibility\"");
    }

    #[test]
    fn pillar_deserializes_from_lowercase() {
        let pillar: Pillar = serde_json::from_str("\"visibility\"").unwrap();
        assert_eq!(pillar, Pillar::Visibility);
    }
}
