use crate::error::{Result, RooError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Target-side names
// ---------------------------------------------------------------------------

pub const ROOMODES_FILE: &str = ".roomodes";
pub const ROO_DIR: &str = ".roo";
pub const RULES_DIR: &str = ".roo/rules";

// ---------------------------------------------------------------------------
// Source-side names
// ---------------------------------------------------------------------------

pub const MODES_CATALOG: &str = "modes.json";
pub const CATEGORIES_CATALOG: &str = "categories.json";
pub const USER_DEFINITIONS_FILE: &str = "user-definitions.json";
pub const SOURCE_RULES_DIR: &str = "rules";

/// Directory under the user's home holding the overlay and its rule files.
pub const USER_CONFIG_DIR: &str = ".roo-init";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn roomodes_path(target: &Path) -> PathBuf {
    target.join(ROOMODES_FILE)
}

pub fn rules_dir(target: &Path) -> PathBuf {
    target.join(RULES_DIR)
}

pub fn mode_rules_dir(target: &Path, slug: &str) -> PathBuf {
    rules_dir(target).join(slug)
}

pub fn modes_catalog_path(system_dir: &Path) -> PathBuf {
    system_dir.join(MODES_CATALOG)
}

pub fn categories_catalog_path(system_dir: &Path) -> PathBuf {
    system_dir.join(CATEGORIES_CATALOG)
}

pub fn user_definitions_path(user_dir: &Path) -> PathBuf {
    user_dir.join(USER_DEFINITIONS_FILE)
}

pub fn source_rules_root(source_dir: &Path) -> PathBuf {
    source_dir.join(SOURCE_RULES_DIR)
}

/// Default system definitions directory: `definitions/` next to the
/// running executable. Installs lay the catalog down beside the binary;
/// anything else overrides via flag or environment.
pub fn default_system_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .map(|p| p.join("definitions"))
        .ok_or_else(|| RooError::DefinitionsUnavailable {
            path: exe.clone(),
            reason: "executable has no parent directory".to_string(),
        })?;
    Ok(dir)
}

/// Default user definitions directory: `~/.roo-init`.
pub fn default_user_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(RooError::HomeNotFound)?;
    Ok(home.join(USER_CONFIG_DIR))
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(RooError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
