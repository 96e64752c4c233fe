//! Writing selected definitions into a target project.
//!
//! Every write honors one conflict rule: an existing destination without
//! `force` is skipped with a warning, never overwritten and never fatal.
//! Real I/O failures abort with source and destination named.

use crate::definitions::{Merged, ModeDefinition};
use crate::error::{Result, RooError};
use crate::io;
use crate::paths;
use crate::types::Origin;
use crate::ui::Ui;
use serde::Serialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Outcome accounting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Skipped,
}

/// Copied-vs-skipped tally for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub skipped: usize,
}

impl CopyStats {
    pub fn record(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn absorb(&mut self, other: CopyStats) {
        self.copied += other.copied;
        self.skipped += other.skipped;
    }
}

// ---------------------------------------------------------------------------
// Descriptor (.roomodes)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomodesFile {
    custom_modes: Vec<RoomodesEntry>,
}

/// Public fields of one selected mode as they appear in `.roomodes`.
/// The mode description is published as `roleDefinition`; user-origin
/// modes are labeled `custom` in the file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomodesEntry {
    slug: String,
    name: String,
    role_definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    groups: Option<serde_json::Value>,
    source: &'static str,
}

impl From<&ModeDefinition> for RoomodesEntry {
    fn from(mode: &ModeDefinition) -> Self {
        Self {
            slug: mode.slug.clone(),
            name: mode.name.clone(),
            role_definition: mode.description.clone(),
            custom_instructions: mode.custom_instructions.clone(),
            groups: mode.groups.clone(),
            source: match mode.origin {
                Origin::System => "system",
                Origin::User => "custom",
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Create a directory and any missing ancestors; no-op when present.
pub fn ensure_dir(path: &Path) -> Result<()> {
    io::ensure_dir(path)
}

/// Copy one file under the conflict policy. An existing destination
/// without `force` is skipped and warned about; with `force` the
/// destination is replaced. The destination's parent is created as needed.
pub fn copy_file(src: &Path, dst: &Path, force: bool, ui: &dyn Ui) -> Result<CopyOutcome> {
    if dst.exists() && !force {
        warn_conflict(ui, dst);
        return Ok(CopyOutcome::Skipped);
    }
    if let Some(parent) = dst.parent() {
        io::ensure_dir(parent)?;
    }
    std::fs::copy(src, dst).map_err(|e| RooError::CopyFailed {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(from = %src.display(), to = %dst.display(), "copied rule file");
    Ok(CopyOutcome::Copied)
}

/// Serialize the selected modes into `<target>/.roomodes` under the same
/// exists/force policy as [`copy_file`]. The write is atomic.
pub fn write_descriptor(
    target: &Path,
    modes: &[&Merged<ModeDefinition>],
    force: bool,
    ui: &dyn Ui,
) -> Result<CopyOutcome> {
    let path = paths::roomodes_path(target);
    if path.exists() && !force {
        warn_conflict(ui, &path);
        return Ok(CopyOutcome::Skipped);
    }

    let descriptor = RoomodesFile {
        custom_modes: modes.iter().map(|m| RoomodesEntry::from(&m.item)).collect(),
    };
    let mut json = serde_json::to_string_pretty(&descriptor)?;
    json.push('\n');
    io::atomic_write(&path, json.as_bytes())?;
    Ok(CopyOutcome::Copied)
}

/// Ensure `<target>/.roo/rules/<slug>/` and copy every associated rule
/// file into it. A `sourcePath` naming a directory is copied as a whole
/// tree; both cases share the per-file conflict rule.
pub fn materialize_rules_for_mode(
    target: &Path,
    mode: &ModeDefinition,
    rules_root: &Path,
    force: bool,
    ui: &dyn Ui,
) -> Result<CopyStats> {
    let dest_dir = paths::mode_rules_dir(target, &mode.slug);
    ensure_dir(&dest_dir)?;

    let mut stats = CopyStats::default();
    for rule in &mode.associated_rule_files {
        let src = rules_root.join(&rule.source_path);
        let file_name = src
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&rule.source_path));
        let dst = dest_dir.join(file_name);
        if src.is_dir() {
            stats.absorb(copy_dir(&src, &dst, force, ui)?);
        } else {
            stats.record(copy_file(&src, &dst, force, ui)?);
        }
    }
    Ok(stats)
}

/// Copy a directory tree with an explicit worklist instead of recursion.
/// Directories are created eagerly; files go through [`copy_file`], so the
/// nested and flat cases share one conflict rule and one tally.
pub fn copy_dir(src: &Path, dst: &Path, force: bool, ui: &dyn Ui) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    let mut queue: VecDeque<(PathBuf, PathBuf)> = VecDeque::new();
    queue.push_back((src.to_path_buf(), dst.to_path_buf()));

    while let Some((from, to)) = queue.pop_front() {
        ensure_dir(&to)?;
        for entry in std::fs::read_dir(&from)? {
            let entry = entry?;
            let entry_dst = to.join(entry.file_name());
            if entry.file_type()?.is_dir() {
                queue.push_back((entry.path(), entry_dst));
            } else {
                stats.record(copy_file(&entry.path(), &entry_dst, force, ui)?);
            }
        }
    }
    Ok(stats)
}

fn warn_conflict(ui: &dyn Ui, dst: &Path) {
    let message = format!(
        "skipped {}: already exists (use --force to overwrite)",
        dst.display()
    );
    tracing::warn!("{message}");
    ui.warning(&message);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
