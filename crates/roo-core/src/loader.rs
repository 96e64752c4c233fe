//! Catalog loading, layered merge, and referential integrity.
//!
//! The system catalogs are required and any problem with them is fatal.
//! The user overlay degrades: absent, unreadable, or structurally invalid
//! overlays all fall back to the built-in definitions with a warning, so a
//! broken personal override file never blocks the tool outright.

use crate::definitions::{Merged, MergedDefinitions, UserDefinitions};
use crate::error::{Result, RooError};
use crate::paths;
use crate::schema;
use crate::types::{Origin, Provenance};
use crate::ui::Ui;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// DefinitionSources
// ---------------------------------------------------------------------------

/// The two layered definition sources: the built-in catalog directory and
/// the user-editable overlay directory.
#[derive(Debug, Clone)]
pub struct DefinitionSources {
    pub system_dir: PathBuf,
    pub user_dir: PathBuf,
}

impl DefinitionSources {
    pub fn new(system_dir: impl Into<PathBuf>, user_dir: impl Into<PathBuf>) -> Self {
        Self {
            system_dir: system_dir.into(),
            user_dir: user_dir.into(),
        }
    }

    /// Rules root a given origin's `sourcePath`s resolve against.
    pub fn rules_root(&self, origin: Origin) -> PathBuf {
        match origin {
            Origin::System => paths::source_rules_root(&self.system_dir),
            Origin::User => paths::source_rules_root(&self.user_dir),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load both catalogs, merge the user overlay onto the system catalog by
/// slug, and verify referential integrity over the merged result.
///
/// Catalogs are read fresh on every call; the returned view is meant to be
/// held immutably for the rest of the run.
pub fn load_definitions(sources: &DefinitionSources, ui: &dyn Ui) -> Result<MergedDefinitions> {
    let modes_path = paths::modes_catalog_path(&sources.system_dir);
    let categories_path = paths::categories_catalog_path(&sources.system_dir);

    let modes_value = read_system_json(&modes_path)?;
    let system_modes = schema::parse_modes(&modes_value, Origin::System).map_err(|violations| {
        RooError::InvalidCatalog {
            path: modes_path.clone(),
            violations,
        }
    })?;
    reject_duplicate_slugs("mode", system_modes.iter().map(|m| m.slug.as_str()), &modes_path)?;

    let categories_value = read_system_json(&categories_path)?;
    let system_categories = schema::parse_categories(&categories_value, Origin::System).map_err(
        |violations| RooError::InvalidCatalog {
            path: categories_path.clone(),
            violations,
        },
    )?;
    reject_duplicate_slugs(
        "category",
        system_categories.iter().map(|c| c.slug.as_str()),
        &categories_path,
    )?;

    let overlay = load_user_overlay(&paths::user_definitions_path(&sources.user_dir), ui);

    // Merge before the integrity pass: a user mode that re-categorizes a
    // system mode must be checked against the merged category set.
    let categories = merge_by_slug(system_categories, overlay.custom_categories, |c| {
        c.slug.as_str()
    });
    let modes = merge_by_slug(system_modes, overlay.custom_modes, |m| m.slug.as_str());

    let merged = MergedDefinitions { modes, categories };
    check_integrity(&merged, sources)?;
    Ok(merged)
}

fn read_system_json(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path).map_err(|e| RooError::DefinitionsUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| RooError::DefinitionsUnavailable {
        path: path.to_path_buf(),
        reason: format!("invalid JSON: {e}"),
    })
}

fn reject_duplicate_slugs<'a>(
    kind: &'static str,
    slugs: impl Iterator<Item = &'a str>,
    path: &Path,
) -> Result<()> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(RooError::DuplicateSlug {
                kind,
                slug: slug.to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Read the optional user overlay. Every failure mode here degrades to the
/// empty overlay with a warning; only the warning text differs.
fn load_user_overlay(path: &Path, ui: &dyn Ui) -> UserDefinitions {
    if !path.exists() {
        return UserDefinitions::default();
    }

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            degrade(ui, path, &format!("cannot read file: {e}"));
            return UserDefinitions::default();
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            degrade(ui, path, &format!("invalid JSON: {e}"));
            return UserDefinitions::default();
        }
    };

    match schema::parse_user_definitions(&value) {
        Ok(defs) => {
            let dup = first_duplicate(defs.custom_modes.iter().map(|m| m.slug.as_str()))
                .or_else(|| first_duplicate(defs.custom_categories.iter().map(|c| c.slug.as_str())));
            if let Some(slug) = dup {
                degrade(ui, path, &format!("duplicate slug '{slug}'"));
                return UserDefinitions::default();
            }
            defs
        }
        Err(violations) => {
            degrade(ui, path, &violations.to_string());
            UserDefinitions::default()
        }
    }
}

fn first_duplicate<'a>(slugs: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Some(slug.to_string());
        }
    }
    None
}

fn degrade(ui: &dyn Ui, path: &Path, reason: &str) {
    let message = format!(
        "ignoring user definitions {}: {reason}; proceeding with built-in definitions only",
        path.display()
    );
    tracing::warn!("{message}");
    ui.warning(&message);
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Overlay `user` entries onto `system` entries by slug. System order is
/// preserved; overridden entries are replaced in place; new user slugs are
/// appended in their own order.
fn merge_by_slug<T>(
    system: Vec<T>,
    user: Vec<T>,
    slug_of: impl Fn(&T) -> &str,
) -> Vec<Merged<T>> {
    let mut merged: Vec<Merged<T>> = system
        .into_iter()
        .map(|item| Merged {
            item,
            provenance: Provenance::System,
        })
        .collect();

    for item in user {
        let slug = slug_of(&item).to_string();
        match merged.iter_mut().find(|m| slug_of(&m.item) == slug) {
            Some(existing) => {
                existing.item = item;
                existing.provenance = Provenance::CustomOverridesSystem;
            }
            None => merged.push(Merged {
                item,
                provenance: Provenance::Custom,
            }),
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Integrity
// ---------------------------------------------------------------------------

/// Verify that every mode's category references resolve in the merged
/// category set and every associated rule file exists on disk under the
/// rules root of the mode's origin. Runs before anything is written to a
/// target, so a failure never leaves a target half-modified.
fn check_integrity(merged: &MergedDefinitions, sources: &DefinitionSources) -> Result<()> {
    let known: HashSet<&str> = merged
        .categories
        .iter()
        .map(|c| c.item.slug.as_str())
        .collect();

    for mode in &merged.modes {
        for category in &mode.item.category_slugs {
            if !known.contains(category.as_str()) {
                return Err(RooError::UnknownCategory {
                    mode: mode.item.slug.clone(),
                    category: category.clone(),
                });
            }
        }
        let rules_root = sources.rules_root(mode.item.origin);
        for rule in &mode.item.associated_rule_files {
            let resolved = rules_root.join(&rule.source_path);
            if !resolved.exists() {
                return Err(RooError::MissingRuleFile {
                    mode: mode.item.slug.clone(),
                    rule: rule.id.clone(),
                    path: resolved,
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
