//! # kindex CLI (`kdx`)
//!
//! The `kdx` binary fronts the kindex engine: it supplies the workspace
//! root, turns a caller-supplied name into a definition query, and in watch
//! mode subscribes to file-system changes.
//!
//! ## Usage
//!
//! ```bash
//! kdx --root ./manifests <command>
//! kdx --config ./kindex.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kdx index` | Run one full workspace scan and print index statistics |
//! | `kdx entities` | List every indexed entity with its definition site |
//! | `kdx resolve <name>` | Print where `<name>` is defined, as `file:line:column` |
//! | `kdx watch` | Keep the index fresh by rebuilding on file changes |
//!
//! ## Examples
//!
//! ```bash
//! # Index the current directory
//! kdx index
//!
//! # Where is the `db` component defined?
//! kdx resolve db --root ./deploy
//!
//! # Which entities reference it?
//! kdx entities --referencing db --root ./deploy
//!
//! # Rebuild on every manifest change
//! kdx watch --root ./deploy
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kindex::{config, index, list, resolve, watch};

/// kindex — a workspace indexer and go-to-definition resolver for YAML
/// entity manifests.
///
/// The workspace root comes from `--root`, or from the `[workspace]`
/// section of the TOML file named by `--config`; `--root` wins when both
/// are given.
#[derive(Parser)]
#[command(
    name = "kdx",
    about = "kindex — index YAML entity manifests and resolve definitions by name",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workspace root to index. Overrides the config file; defaults to the
    /// current directory when neither is given.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run one full workspace scan and print index statistics.
    ///
    /// Scans the manifest tree, parses every `.yaml` / `.yml` file, and
    /// reports how many documents and entities were indexed and what was
    /// skipped. Unreadable or malformed files never fail the run.
    Index {
        /// Emit statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List every indexed entity with its kind and definition site.
    Entities {
        /// Only show entities whose references include this name.
        #[arg(long)]
        referencing: Option<String>,
    },

    /// Resolve a name to its definition site.
    ///
    /// Prints `file:line:column` (1-based) for the first entity whose name
    /// matches exactly, or a no-result message. Matching is case-sensitive
    /// with no substring or fuzzy matching.
    Resolve {
        /// The entity name to look up.
        name: String,

        /// Emit the definition as JSON (`null` on a miss).
        #[arg(long)]
        json: bool,
    },

    /// Watch the workspace and rebuild the index on every manifest change.
    ///
    /// Every create, modify, or delete of a `.yaml` / `.yml` file outside
    /// the excluded directories triggers a full re-scan of the tree. Runs
    /// until interrupted.
    Watch,
}

fn load_config(cli: &Cli) -> anyhow::Result<config::Config> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::Config::with_root(std::env::current_dir()?),
    };
    if let Some(root) = &cli.root {
        cfg.workspace.root = root.clone();
    }
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries command output only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kindex=warn,kdx=warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    match cli.command {
        Commands::Index { json } => {
            index::run_index(&cfg, json)?;
        }
        Commands::Entities { referencing } => {
            list::list_entities(&cfg, referencing.as_deref())?;
        }
        Commands::Resolve { name, json } => {
            resolve::run_resolve(&cfg, &name, json)?;
        }
        Commands::Watch => {
            watch::run_watch(&cfg)?;
        }
    }

    Ok(())
}
