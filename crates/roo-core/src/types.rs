use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// Which definition source an entry was authored in, prior to merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    System,
    User,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::System => "system",
            Origin::User => "user",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Provenance
// ---------------------------------------------------------------------------

/// Post-merge classification of an entry. Derived once at merge time,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    System,
    Custom,
    CustomOverridesSystem,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::System => "system",
            Provenance::Custom => "custom",
            Provenance::CustomOverridesSystem => "custom (overrides system)",
        }
    }

    pub fn is_custom(self) -> bool {
        matches!(self, Provenance::Custom | Provenance::CustomOverridesSystem)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SourceFilter
// ---------------------------------------------------------------------------

/// Filter for list operations: show only custom entries, only system
/// entries, or everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFilter {
    Custom,
    System,
    #[default]
    All,
}

impl SourceFilter {
    pub fn matches(self, provenance: Provenance) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Custom => provenance.is_custom(),
            SourceFilter::System => provenance == Provenance::System,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceFilter::Custom => "custom",
            SourceFilter::System => "system",
            SourceFilter::All => "all",
        }
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceFilter {
    type Err = crate::error::RooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(SourceFilter::Custom),
            "system" => Ok(SourceFilter::System),
            "all" => Ok(SourceFilter::All),
            _ => Err(crate::error::RooError::InvalidSourceFilter(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provenance_display() {
        assert_eq!(Provenance::System.to_string(), "system");
        assert_eq!(Provenance::Custom.to_string(), "custom");
        assert_eq!(
            Provenance::CustomOverridesSystem.to_string(),
            "custom (overrides system)"
        );
    }

    #[test]
    fn source_filter_matches() {
        assert!(SourceFilter::All.matches(Provenance::System));
        assert!(SourceFilter::All.matches(Provenance::Custom));
        assert!(SourceFilter::Custom.matches(Provenance::Custom));
        assert!(SourceFilter::Custom.matches(Provenance::CustomOverridesSystem));
        assert!(!SourceFilter::Custom.matches(Provenance::System));
        assert!(SourceFilter::System.matches(Provenance::System));
        assert!(!SourceFilter::System.matches(Provenance::CustomOverridesSystem));
    }

    #[test]
    fn source_filter_roundtrip() {
        for filter in [SourceFilter::Custom, SourceFilter::System, SourceFilter::All] {
            let parsed = SourceFilter::from_str(filter.as_str()).unwrap();
            assert_eq!(filter, parsed);
        }
        assert!(SourceFilter::from_str("bogus").is_err());
    }

    #[test]
    fn origin_serde_names() {
        assert_eq!(serde_json::to_string(&Origin::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Origin::User).unwrap(), "\"user\"");
    }
}
