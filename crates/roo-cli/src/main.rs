mod cmd;
mod output;
mod term;

use clap::{Parser, Subcommand};
use cmd::list::ListSubcommand;
use roo_core::loader::DefinitionSources;
use roo_core::paths;
use std::path::PathBuf;
use term::TerminalUi;

#[derive(Parser)]
#[command(
    name = "roo-init",
    about = "Scaffold a project with curated Roo modes and their rule files",
    version,
    propagate_version = true
)]
struct Cli {
    /// System definitions directory (default: definitions/ next to the executable)
    #[arg(long, global = true, env = "ROO_INIT_DEFINITIONS_DIR")]
    definitions: Option<PathBuf>,

    /// User definitions directory (default: ~/.roo-init)
    #[arg(long = "user-dir", global = true, env = "ROO_INIT_USER_DIR")]
    user_dir: Option<PathBuf>,

    /// Output as JSON where applicable
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold selected modes and rule files into a target project
    Init {
        /// Target project directory (default: current directory)
        #[arg(env = "ROO_INIT_TARGET")]
        target: Option<PathBuf>,

        /// Comma-separated mode slugs to scaffold
        #[arg(long)]
        modes: Option<String>,

        /// Comma-separated category slugs; expands to every mode in each
        #[arg(long)]
        category: Option<String>,

        /// Overwrite files that already exist in the target
        #[arg(long)]
        force: bool,

        /// Never prompt; implied by --modes / --category
        #[arg(long)]
        non_interactive: bool,
    },

    /// List modes and categories from the merged catalogs
    List {
        #[command(subcommand)]
        subcommand: ListSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let ui = TerminalUi;
    let result = resolve_sources(&cli).and_then(|sources| match cli.command {
        Commands::Init {
            target,
            modes,
            category,
            force,
            non_interactive,
        } => {
            let target = target.map(Ok).unwrap_or_else(std::env::current_dir)?;
            let args = cmd::init::InitArgs {
                modes: modes.as_deref(),
                category: category.as_deref(),
                force,
                non_interactive,
            };
            cmd::init::run(&sources, &target, &args, &ui)
        }
        Commands::List { subcommand } => cmd::list::run(&sources, subcommand, cli.json, &ui),
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn resolve_sources(cli: &Cli) -> anyhow::Result<DefinitionSources> {
    let system_dir = match &cli.definitions {
        Some(dir) => dir.clone(),
        None => paths::default_system_dir()?,
    };
    let user_dir = match &cli.user_dir {
        Some(dir) => dir.clone(),
        None => paths::default_user_dir()?,
    };
    Ok(DefinitionSources::new(system_dir, user_dir))
}
