//! Tier module - how much disambiguation a tool name needs

/// Matching tier of a catalog tool
///
/// Tiers are bound to names when the catalog is built:
/// - Unambiguous: no collision with ordinary words, plain substring match
/// - Ambiguous: collides with common words, versions or phrases; needs a strategy
/// - Fallback: name absent from every tier table, treated like Unambiguous
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Case-insensitive substring match
    Unambiguous,

    /// Disambiguation strategy required
    Ambiguous,

    /// Not in the catalog; default substring rule
    Fallback,
}

impl Tier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Unambiguous => "unambiguous",
            Tier::Ambiguous => "ambiguous",
            Tier::Fallback => "fallback",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unambiguous" | "tier1" => Some(Tier::Unambiguous),
            "ambiguous" | "tier2" => Some(Tier::Ambiguous),
            "fallback" => Some(Tier::Fallback),
            _ => None,
        }
    }

    /// Whether matching needs more than a substring test
    pub fn is_strict(&self) -> bool {
        matches!(self, Tier::Ambiguous)
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}
