//! Core data models for the music catalog.
//!
//! Defines the primary entities: [`Performer`], [`Person`], [`Group`],
//! [`Album`], and [`Song`]. These are derived from SQLx for database
//! mapping.
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `performers` - Artist credits, classified by `type_id`
//! - `persons` / `groups` - Biographical detail for classified performers
//! - `in_group` - Person-to-group memberships
//! - `albums` - Albums identified by (name, year)
//! - `rolas` - Individual songs with their mined metadata

use sqlx::FromRow;

/// Classification of a performer, stored as `type_id`.
///
/// Freshly mined performers start as [`PerformerKind::Person`] unless the
/// artist tag was absent, in which case they are [`PerformerKind::Unknown`]
/// until the user reclassifies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformerKind {
    Person,
    Group,
    Unknown,
}

impl PerformerKind {
    /// The `type_id` value stored in the database.
    pub fn as_i64(self) -> i64 {
        match self {
            PerformerKind::Person => 0,
            PerformerKind::Group => 1,
            PerformerKind::Unknown => 2,
        }
    }

    /// Decode a stored `type_id`. Unrecognized values map to `Unknown`.
    pub fn from_i64(value: i64) -> Self {
        match value {
            0 => PerformerKind::Person,
            1 => PerformerKind::Group,
            _ => PerformerKind::Unknown,
        }
    }
}

/// An artist credit on a song; may later be classified as a person or group.
#[derive(Debug, Clone, FromRow)]
pub struct Performer {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Classification, see [`PerformerKind`]
    pub type_id: i64,
    /// Performer name (unique)
    pub name: String,
}

impl Performer {
    pub fn kind(&self) -> PerformerKind {
        PerformerKind::from_i64(self.type_id)
    }
}

/// Biographical detail for a performer defined as a person.
///
/// Dates are free-text; "0" conventionally means "still alive".
#[derive(Debug, Clone, FromRow)]
pub struct Person {
    pub id: i64,
    pub stage_name: String,
    pub real_name: String,
    pub birth_date: String,
    pub death_date: String,
}

/// Biographical detail for a performer defined as a group.
#[derive(Debug, Clone, FromRow)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

/// An album in the catalog, identified by (name, year).
#[derive(Debug, Clone, FromRow)]
pub struct Album {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Directory containing the album's tracks (heuristic, not a
    /// guaranteed common root)
    pub path: String,
    pub name: String,
    pub year: i64,
}

/// A song row as stored in `rolas`.
#[derive(Debug, Clone, FromRow)]
pub struct Song {
    /// Database ID (auto-generated)
    pub id: i64,
    pub performer_id: i64,
    pub album_id: i64,
    /// Absolute file path
    pub path: String,
    pub title: String,
    pub track: i64,
    pub year: i64,
    pub genre: String,
}

/// A song joined with performer and album display names.
///
/// This is the shape returned by listing and search operations, where
/// human-readable names are needed rather than foreign key IDs.
#[derive(Debug, Clone, FromRow)]
pub struct SongDetails {
    pub id: i64,
    pub performer_id: i64,
    pub album_id: i64,
    pub path: String,
    pub title: String,
    pub track: i64,
    pub year: i64,
    pub genre: String,
    pub performer_name: String,
    pub album_name: String,
}
