//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `scan`: mining a directory into the catalog, listing, config
//! - `search`: faceted search over the catalog

mod scan;
mod search;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use scan::{cmd_list, cmd_scan, cmd_set_directory};
pub use search::cmd_search;

/// Music Cataloger CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the catalog database file (default: music_cataloger.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Mine a directory of MP3 files into the catalog
    Scan {
        /// Directory to mine (default: the configured music directory)
        path: Option<PathBuf>,
    },
    /// List all songs in the catalog
    List,
    /// Search the catalog (e.g. "ti:Song&&Other||ar:Band")
    Search {
        /// Query in the faceted search language
        query: String,
    },
    /// Set the configured music directory
    SetDirectory {
        /// New music root
        path: PathBuf,
    },
}

/// Dispatch the parsed command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let db_path = cli.db.as_deref();

    match &cli.command {
        Commands::Scan { path } => cmd_scan(&rt, db_path, path.as_deref()),
        Commands::List => cmd_list(&rt, db_path),
        Commands::Search { query } => cmd_search(&rt, db_path, query),
        Commands::SetDirectory { path } => cmd_set_directory(path),
    }
}
