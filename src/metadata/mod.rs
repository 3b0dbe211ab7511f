//! Audio file metadata reading and normalization.
//!
//! Uses the lofty crate for format-independent tag access. Reading
//! produces a [`RawTags`] record in which every field may be absent;
//! [`normalize`] turns that into a fully-populated [`SongTags`] using
//! fixed default rules:
//!
//! - string fields: absent or empty becomes the literal `"Unknown"`
//! - year: absent or zero becomes the caller-supplied calendar year
//! - track and disc (number, total) pairs: a zero member becomes 1

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey};
use std::path::Path;

use crate::error::{Error, Result};

/// Placeholder for string tags the file did not carry.
pub const UNKNOWN: &str = "Unknown";

/// Tag fields exactly as found in the file. `None` means the tag was not
/// present; `Some("")` means present but empty. [`normalize`] treats both
/// the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub genre: Option<String>,
    pub comment: Option<String>,
    pub composer: Option<String>,
    pub year: Option<u32>,
    /// (number, total)
    pub track: (Option<u32>, Option<u32>),
    /// (number, total)
    pub disc: (Option<u32>, Option<u32>),
}

/// Fully-populated metadata record - uses String for SQLx compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub genre: String,
    pub comment: String,
    pub composer: String,
    pub year: i64,
    pub track: (u32, u32),
    pub disc: (u32, u32),
}

/// Read the embedded tag container of one file.
///
/// # Errors
///
/// Returns [`Error::TagRead`] if the file cannot be opened, is not a
/// recognized audio format, or carries no tag container. The mining
/// pipeline treats this as a per-file skip, not a fatal error.
pub fn read_raw(path: &Path) -> Result<RawTags> {
    let tagged_file = Probe::open(path)
        .map_err(|e| Error::tag_read(path, e.to_string()))?
        .read()
        .map_err(|e| Error::tag_read(path, e.to_string()))?;

    // Primary tag for the format, or the first available one
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .ok_or_else(|| Error::tag_read(path, "no tag container found"))?;

    Ok(RawTags {
        title: tag.title().map(|s| s.into_owned()),
        artist: tag.artist().map(|s| s.into_owned()),
        album: tag.album().map(|s| s.into_owned()),
        album_artist: tag
            .get_string(&ItemKey::AlbumArtist)
            .map(|s| s.to_string()),
        genre: tag.genre().map(|s| s.into_owned()),
        comment: tag.comment().map(|s| s.into_owned()),
        composer: tag.get_string(&ItemKey::Composer).map(|s| s.to_string()),
        year: tag.year(),
        track: (tag.track(), tag.track_total()),
        disc: (tag.disk(), tag.disk_total()),
    })
}

/// Fill absent fields with defaults. Pure function of its inputs; the
/// caller supplies `current_year` so mining decides the clock once per
/// batch.
pub fn normalize(raw: RawTags, current_year: i32) -> SongTags {
    SongTags {
        title: fill_string(raw.title),
        artist: fill_string(raw.artist),
        album: fill_string(raw.album),
        album_artist: fill_string(raw.album_artist),
        genre: fill_string(raw.genre),
        comment: fill_string(raw.comment),
        composer: fill_string(raw.composer),
        year: fill_year(raw.year, current_year),
        track: fill_pair(raw.track),
        disc: fill_pair(raw.disc),
    }
}

fn fill_string(tag: Option<String>) -> String {
    match tag {
        Some(s) if !s.is_empty() => s,
        _ => UNKNOWN.to_string(),
    }
}

fn fill_year(year: Option<u32>, current_year: i32) -> i64 {
    match year {
        Some(y) if y != 0 => i64::from(y),
        _ => i64::from(current_year),
    }
}

fn fill_pair(pair: (Option<u32>, Option<u32>)) -> (u32, u32) {
    let (number, total) = (pair.0.unwrap_or(0), pair.1.unwrap_or(0));
    match (number, total) {
        (0, 0) => (1, 1),
        (0, t) => (1, t),
        (n, 0) => (n, 1),
        (n, t) => (n, t),
    }
}
