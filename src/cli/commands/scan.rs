//! Mining, listing, and config commands.

use std::io::Write;
use std::path::Path;
use tokio::runtime::Runtime;

use crate::config;
use crate::db;
use crate::library::Catalog;

/// Mine a directory of MP3 files into the catalog.
///
/// Falls back to the configured music directory when no path is given.
pub fn cmd_scan(rt: &Runtime, db_path: Option<&Path>, path: Option<&Path>) -> anyhow::Result<()> {
    let root = match path {
        Some(p) => p.to_path_buf(),
        None => config::load().music_directory,
    };

    rt.block_on(async {
        let catalog = Catalog::open(&db::db_url(db_path)).await?;
        println!("Mining directory: {}", root.display());

        let report = catalog
            .mine(&root, |pct| {
                print!("\rMining... {pct}%");
                let _ = std::io::stdout().flush();
            })
            .await?;

        println!(
            "\nMining complete: {} mined, {} skipped of {} files.",
            report.mined, report.skipped, report.total
        );
        Ok(())
    })
}

/// List all songs in the catalog.
pub fn cmd_list(rt: &Runtime, db_path: Option<&Path>) -> anyhow::Result<()> {
    rt.block_on(async {
        let catalog = Catalog::open(&db::db_url(db_path)).await?;
        for song in catalog.all_songs().await? {
            println!(
                "{} - {} [{}] ({})",
                song.performer_name, song.title, song.album_name, song.path
            );
        }
        Ok(())
    })
}

/// Persist a new music root directory.
pub fn cmd_set_directory(path: &Path) -> anyhow::Result<()> {
    let config = config::set_directory(path)?;
    println!(
        "Music directory set to {}",
        config.music_directory.display()
    );
    Ok(())
}
