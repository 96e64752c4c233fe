use crate::types::{Origin, Provenance};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// One associated file for a mode. `source_path` is relative to the rules
/// root of the owning source; the content itself is opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source_path: String,
    /// Applies globally rather than to a single mode.
    #[serde(default)]
    pub is_generic: bool,
}

// ---------------------------------------------------------------------------
// ModeDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeDefinition {
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_instructions: Option<String>,
    /// Tool-group grants; opaque to the engine, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<serde_json::Value>,
    pub category_slugs: Vec<String>,
    #[serde(default)]
    pub associated_rule_files: Vec<Rule>,
    /// Stamped by the loader, never read from the catalog file.
    #[serde(skip)]
    pub origin: Origin,
}

// ---------------------------------------------------------------------------
// CategoryDefinition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub origin: Origin,
}

// ---------------------------------------------------------------------------
// UserDefinitions
// ---------------------------------------------------------------------------

/// The optional user-overlay container. An absent file is equivalent to
/// the default (empty) value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDefinitions {
    #[serde(default)]
    pub custom_modes: Vec<ModeDefinition>,
    #[serde(default)]
    pub custom_categories: Vec<CategoryDefinition>,
}

impl UserDefinitions {
    pub fn is_empty(&self) -> bool {
        self.custom_modes.is_empty() && self.custom_categories.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Merged
// ---------------------------------------------------------------------------

/// Post-merge projection of a mode or category with its derived provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Merged<T> {
    #[serde(flatten)]
    pub item: T,
    pub provenance: Provenance,
}

/// The merged view held immutably for the remainder of a run.
#[derive(Debug, Clone, Default)]
pub struct MergedDefinitions {
    pub modes: Vec<Merged<ModeDefinition>>,
    pub categories: Vec<Merged<CategoryDefinition>>,
}

impl MergedDefinitions {
    pub fn mode(&self, slug: &str) -> Option<&Merged<ModeDefinition>> {
        self.modes.iter().find(|m| m.item.slug == slug)
    }

    pub fn category(&self, slug: &str) -> Option<&Merged<CategoryDefinition>> {
        self.categories.iter().find(|c| c.item.slug == slug)
    }

    pub fn modes_in_category(&self, category_slug: &str) -> Vec<&Merged<ModeDefinition>> {
        self.modes
            .iter()
            .filter(|m| m.item.category_slugs.iter().any(|c| c == category_slug))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
