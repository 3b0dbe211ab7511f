//! Command-line interface for music-cataloger.
//!
//! This module provides CLI commands for mining, listing, and searching
//! the catalog without any graphical front end.

mod commands;

pub use commands::{Cli, Commands, run_command};
