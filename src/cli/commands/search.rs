//! Faceted search command.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::db;
use crate::library::Catalog;

/// Search the catalog with the faceted query language.
pub fn cmd_search(rt: &Runtime, db_path: Option<&Path>, query: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let catalog = Catalog::open(&db::db_url(db_path)).await?;
        let songs = catalog.search(query).await?;

        for song in &songs {
            println!(
                "{} - {} [{}] track {} ({}) {}",
                song.performer_name, song.title, song.album_name, song.track, song.year, song.genre
            );
        }
        println!("{} result(s).", songs.len());
        Ok(())
    })
}
