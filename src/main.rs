//! Music Cataloger - mines MP3 metadata into a searchable catalog.
//!
//! Scans a directory tree for MP3 files, extracts embedded tag metadata,
//! normalizes missing fields, and persists songs, performers, albums, and
//! group memberships into a local SQLite catalog driven through CLI
//! commands.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod library;
pub mod metadata;
pub mod model;
pub mod query;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("music_cataloger=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
