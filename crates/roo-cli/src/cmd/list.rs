use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use roo_core::loader::{self, DefinitionSources};
use roo_core::types::SourceFilter;
use roo_core::ui::Ui;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ListSubcommand {
    /// List modes in the merged catalog
    Modes {
        /// Filter by source: custom, system, or all
        #[arg(long, default_value = "all")]
        source: String,
    },

    /// List categories in the merged catalog
    Categories {
        /// Filter by source: custom, system, or all
        #[arg(long, default_value = "all")]
        source: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    sources: &DefinitionSources,
    subcmd: ListSubcommand,
    json: bool,
    ui: &dyn Ui,
) -> anyhow::Result<()> {
    let merged = loader::load_definitions(sources, ui).context("failed to load definitions")?;

    match subcmd {
        ListSubcommand::Modes { source } => {
            let filter = SourceFilter::from_str(&source)?;
            let entries: Vec<serde_json::Value> = merged
                .modes
                .iter()
                .filter(|m| filter.matches(m.provenance))
                .map(|m| {
                    serde_json::json!({
                        "slug": m.item.slug,
                        "name": m.item.name,
                        "source": m.provenance.as_str(),
                        "description": m.item.description,
                        "categories": m.item.category_slugs,
                    })
                })
                .collect();

            if json {
                print_json(&entries)?;
            } else {
                let rows = merged
                    .modes
                    .iter()
                    .filter(|m| filter.matches(m.provenance))
                    .map(|m| {
                        vec![
                            m.item.slug.clone(),
                            m.item.name.clone(),
                            m.provenance.to_string(),
                            m.item.description.clone(),
                        ]
                    })
                    .collect();
                print_table(&["SLUG", "NAME", "SOURCE", "DESCRIPTION"], rows);
            }
        }
        ListSubcommand::Categories { source } => {
            let filter = SourceFilter::from_str(&source)?;
            let entries: Vec<serde_json::Value> = merged
                .categories
                .iter()
                .filter(|c| filter.matches(c.provenance))
                .map(|c| {
                    serde_json::json!({
                        "slug": c.item.slug,
                        "name": c.item.name,
                        "source": c.provenance.as_str(),
                        "description": c.item.description,
                    })
                })
                .collect();

            if json {
                print_json(&entries)?;
            } else {
                let rows = merged
                    .categories
                    .iter()
                    .filter(|c| filter.matches(c.provenance))
                    .map(|c| {
                        vec![
                            c.item.slug.clone(),
                            c.item.name.clone(),
                            c.provenance.to_string(),
                            c.item.description.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                print_table(&["SLUG", "NAME", "SOURCE", "DESCRIPTION"], rows);
            }
        }
    }
    Ok(())
}
