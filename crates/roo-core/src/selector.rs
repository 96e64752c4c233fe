//! Mode selection over the merged catalog. Pure query logic: nothing here
//! touches the filesystem or mutates the merged view.

use crate::definitions::MergedDefinitions;
use crate::error::Result;
use crate::ui::Ui;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Non-interactive resolution
// ---------------------------------------------------------------------------

/// Result of resolving explicit `--modes` / `--category` flags. Unknown
/// slugs are reported, never silently dropped and never fatal; the caller
/// decides how loudly to complain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub selected: Vec<String>,
    pub invalid_mode_slugs: Vec<String>,
    pub invalid_category_slugs: Vec<String>,
}

/// Resolve a comma-separated mode list and/or category list against the
/// merged catalog. The two expansions are unioned with set semantics;
/// the returned selection is sorted for determinism.
pub fn select_non_interactive(
    merged: &MergedDefinitions,
    modes: Option<&str>,
    category: Option<&str>,
) -> Selection {
    let mut selected = BTreeSet::new();
    let mut invalid_mode_slugs = Vec::new();
    let mut invalid_category_slugs = Vec::new();

    for slug in parse_csv(modes) {
        if merged.mode(&slug).is_some() {
            selected.insert(slug);
        } else {
            invalid_mode_slugs.push(slug);
        }
    }

    for slug in parse_csv(category) {
        if merged.category(&slug).is_none() {
            invalid_category_slugs.push(slug);
            continue;
        }
        for mode in merged.modes_in_category(&slug) {
            selected.insert(mode.item.slug.clone());
        }
    }

    Selection {
        selected: selected.into_iter().collect(),
        invalid_mode_slugs,
        invalid_category_slugs,
    }
}

/// Split a comma-separated flag value, trimming whitespace and dropping
/// empty tokens. `None` and `""` both mean "no selection".
fn parse_csv(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Interactive resolution
// ---------------------------------------------------------------------------

/// Walk the user through category-by-category selection rounds.
///
/// Cancelling the category prompt ends the whole selection with an empty
/// result; cancelling the mode prompt only skips the current round. When
/// the catalog has a single category there is nothing else to pick from,
/// so the continue prompt is skipped and the first round's picks returned.
pub fn select_interactive(merged: &MergedDefinitions, ui: &dyn Ui) -> Result<Vec<String>> {
    let mut picked: Vec<String> = Vec::new();

    loop {
        let labels: Vec<String> = merged
            .categories
            .iter()
            .map(|c| match &c.item.description {
                Some(desc) => format!("{} - {}", c.item.name, desc),
                None => c.item.name.clone(),
            })
            .collect();

        let Some(index) = ui.prompt_list("Select a category", &labels)? else {
            return Ok(Vec::new());
        };
        let category = &merged.categories[index].item;

        let modes = merged.modes_in_category(&category.slug);
        if modes.is_empty() {
            ui.info(&format!("No modes available in category '{}'.", category.name));
        } else {
            let labels: Vec<String> = modes
                .iter()
                .map(|m| format!("{} ({}) - {}", m.item.name, m.item.slug, m.item.description))
                .collect();
            if let Some(indices) = ui.prompt_checkbox("Select modes", &labels)? {
                for i in indices {
                    let slug = &modes[i].item.slug;
                    if !picked.iter().any(|p| p == slug) {
                        picked.push(slug.clone());
                    }
                }
            }
        }

        if merged.categories.len() <= 1 {
            return Ok(picked);
        }
        match ui.prompt_confirm("Select modes from another category?", true)? {
            Some(true) => continue,
            _ => return Ok(picked),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{CategoryDefinition, Merged, ModeDefinition};
    use crate::types::{Origin, Provenance};
    use crate::ui::test_support::{Answer, ScriptedUi};

    fn mode(slug: &str, categories: &[&str]) -> Merged<ModeDefinition> {
        Merged {
            item: ModeDefinition {
                slug: slug.to_string(),
                name: slug.to_uppercase(),
                description: format!("{slug} mode"),
                custom_instructions: None,
                groups: None,
                category_slugs: categories.iter().map(|c| c.to_string()).collect(),
                associated_rule_files: Vec::new(),
                origin: Origin::System,
            },
            provenance: Provenance::System,
        }
    }

    fn category(slug: &str) -> Merged<CategoryDefinition> {
        Merged {
            item: CategoryDefinition {
                slug: slug.to_string(),
                name: slug.to_uppercase(),
                description: Some(format!("{slug} category")),
                origin: Origin::System,
            },
            provenance: Provenance::System,
        }
    }

    fn catalog() -> MergedDefinitions {
        MergedDefinitions {
            modes: vec![
                mode("m1", &["code"]),
                mode("m2", &["code", "docs"]),
                mode("m3", &["docs"]),
            ],
            categories: vec![category("code"), category("docs"), category("empty")],
        }
    }

    #[test]
    fn union_of_modes_and_category_expansion() {
        let merged = catalog();
        let sel = select_non_interactive(&merged, Some("m3"), Some("code"));
        assert_eq!(sel.selected, ["m1", "m2", "m3"]);
        assert!(sel.invalid_mode_slugs.is_empty());
        assert!(sel.invalid_category_slugs.is_empty());
    }

    #[test]
    fn duplicates_across_flags_are_deduplicated() {
        let merged = catalog();
        let sel = select_non_interactive(&merged, Some("m1, m1 ,m2"), Some("code"));
        assert_eq!(sel.selected, ["m1", "m2"]);
    }

    #[test]
    fn unknown_slugs_are_reported_not_fatal() {
        let merged = catalog();
        let sel = select_non_interactive(&merged, Some("m1,ghost"), Some("code,nowhere"));
        assert_eq!(sel.selected, ["m1", "m2"]);
        assert_eq!(sel.invalid_mode_slugs, ["ghost"]);
        assert_eq!(sel.invalid_category_slugs, ["nowhere"]);
    }

    #[test]
    fn empty_flags_mean_no_selection() {
        let merged = catalog();
        let sel = select_non_interactive(&merged, Some(""), None);
        assert!(sel.selected.is_empty());
        assert!(sel.invalid_mode_slugs.is_empty());

        let sel = select_non_interactive(&merged, Some(" , ,"), None);
        assert!(sel.selected.is_empty());
    }

    #[test]
    fn interactive_single_round_then_stop() {
        let merged = catalog();
        let ui = ScriptedUi::new([
            Answer::List(Some(0)),                 // category "code"
            Answer::Checkbox(Some(vec![0, 1])),    // m1, m2
            Answer::Confirm(Some(false)),          // stop
        ]);
        let picked = select_interactive(&merged, &ui).unwrap();
        assert_eq!(picked, ["m1", "m2"]);
    }

    #[test]
    fn interactive_accumulates_and_deduplicates_across_rounds() {
        let merged = catalog();
        let ui = ScriptedUi::new([
            Answer::List(Some(0)),              // code
            Answer::Checkbox(Some(vec![1])),    // m2
            Answer::Confirm(Some(true)),        // continue
            Answer::List(Some(1)),              // docs
            Answer::Checkbox(Some(vec![0, 1])), // m2 again, m3
            Answer::Confirm(Some(false)),
        ]);
        let picked = select_interactive(&merged, &ui).unwrap();
        assert_eq!(picked, ["m2", "m3"]);
    }

    #[test]
    fn cancel_at_category_prompt_empties_the_selection() {
        let merged = catalog();
        let ui = ScriptedUi::new([
            Answer::List(Some(0)),
            Answer::Checkbox(Some(vec![0])),
            Answer::Confirm(Some(true)),
            Answer::List(None), // cancel
        ]);
        let picked = select_interactive(&merged, &ui).unwrap();
        assert!(picked.is_empty());
    }

    #[test]
    fn cancel_at_mode_prompt_only_skips_the_round() {
        let merged = catalog();
        let ui = ScriptedUi::new([
            Answer::List(Some(0)),
            Answer::Checkbox(None), // cancel this round
            Answer::Confirm(Some(true)),
            Answer::List(Some(1)),
            Answer::Checkbox(Some(vec![1])), // m3
            Answer::Confirm(Some(false)),
        ]);
        let picked = select_interactive(&merged, &ui).unwrap();
        assert_eq!(picked, ["m3"]);
    }

    #[test]
    fn empty_category_shows_notice_and_moves_on() {
        let merged = catalog();
        let ui = ScriptedUi::new([
            Answer::List(Some(2)), // "empty" category, no modes
            Answer::Confirm(Some(false)),
        ]);
        let picked = select_interactive(&merged, &ui).unwrap();
        assert!(picked.is_empty());
        assert!(ui.infos.borrow()[0].contains("No modes available"));
    }

    #[test]
    fn single_category_skips_the_continue_prompt() {
        let merged = MergedDefinitions {
            modes: vec![mode("m1", &["code"])],
            categories: vec![category("code")],
        };
        // No Confirm answer scripted: the prompt must not fire.
        let ui = ScriptedUi::new([Answer::List(Some(0)), Answer::Checkbox(Some(vec![0]))]);
        let picked = select_interactive(&merged, &ui).unwrap();
        assert_eq!(picked, ["m1"]);
    }

    #[test]
    fn cancel_at_confirm_stops_but_keeps_picks() {
        let merged = catalog();
        let ui = ScriptedUi::new([
            Answer::List(Some(0)),
            Answer::Checkbox(Some(vec![0])),
            Answer::Confirm(None),
        ]);
        let picked = select_interactive(&merged, &ui).unwrap();
        assert_eq!(picked, ["m1"]);
    }
}
