use anyhow::Context;
use roo_core::definitions::{Merged, ModeDefinition};
use roo_core::loader::{self, DefinitionSources};
use roo_core::materialize::{self, CopyOutcome, CopyStats};
use roo_core::selector;
use roo_core::ui::Ui;
use std::path::Path;

pub struct InitArgs<'a> {
    pub modes: Option<&'a str>,
    pub category: Option<&'a str>,
    pub force: bool,
    pub non_interactive: bool,
}

pub fn run(
    sources: &DefinitionSources,
    target: &Path,
    args: &InitArgs<'_>,
    ui: &dyn Ui,
) -> anyhow::Result<()> {
    let merged = loader::load_definitions(sources, ui).context("failed to load definitions")?;

    let non_interactive =
        args.non_interactive || args.modes.is_some() || args.category.is_some();

    let selected: Vec<String> = if non_interactive {
        let selection = selector::select_non_interactive(&merged, args.modes, args.category);
        for slug in &selection.invalid_mode_slugs {
            ui.warning(&format!(
                "unknown mode slug '{slug}' (see 'roo-init list modes')"
            ));
        }
        for slug in &selection.invalid_category_slugs {
            ui.warning(&format!(
                "unknown category slug '{slug}' (see 'roo-init list categories')"
            ));
        }
        selection.selected
    } else {
        let picked = selector::select_interactive(&merged, ui)?;
        if picked.is_empty() {
            // Deliberate abort, not a failure: leave the target untouched.
            ui.info("No modes selected; nothing written.");
            return Ok(());
        }
        picked
    };

    let chosen: Vec<&Merged<ModeDefinition>> = selected
        .iter()
        .filter_map(|slug| merged.mode(slug))
        .collect();

    ui.info(&format!(
        "Scaffolding {} mode(s) into: {}",
        chosen.len(),
        target.display()
    ));

    let mut stats = CopyStats::default();
    let outcome = materialize::write_descriptor(target, &chosen, args.force, ui)
        .context("failed to write .roomodes")?;
    if outcome == CopyOutcome::Copied {
        ui.info("  created: .roomodes");
    }
    stats.record(outcome);

    for mode in &chosen {
        let rules_root = sources.rules_root(mode.item.origin);
        let mode_stats =
            materialize::materialize_rules_for_mode(target, &mode.item, &rules_root, args.force, ui)
                .with_context(|| {
                    format!("failed to materialize rules for mode '{}'", mode.item.slug)
                })?;
        stats.absorb(mode_stats);
    }

    ui.success(&format!(
        "Done: {} file(s) written, {} skipped.",
        stats.copied, stats.skipped
    ));
    Ok(())
}
