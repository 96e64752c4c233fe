use crate::schema::SchemaViolations;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RooError {
    #[error("definitions unavailable: {}: {reason}", path.display())]
    DefinitionsUnavailable { path: PathBuf, reason: String },

    #[error("invalid definitions catalog {}: {violations}", path.display())]
    InvalidCatalog {
        path: PathBuf,
        violations: SchemaViolations,
    },

    #[error("duplicate {kind} slug '{slug}' in {}", path.display())]
    DuplicateSlug {
        kind: &'static str,
        slug: String,
        path: PathBuf,
    },

    #[error("mode '{mode}' references unknown category '{category}'")]
    UnknownCategory { mode: String, category: String },

    #[error("mode '{mode}' rule '{rule}' references missing file: {}", path.display())]
    MissingRuleFile {
        mode: String,
        rule: String,
        path: PathBuf,
    },

    #[error("failed to copy {} to {}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid source filter '{0}': expected custom, system, or all")]
    InvalidSourceFilter(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RooError>;
