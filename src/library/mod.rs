//! Catalog facade and mining pipeline.
//!
//! [`Catalog`] owns the database pool and exposes the complete command
//! surface: mining a directory, listing, faceted search, and the edit
//! operations a front end drives. Store mutations are issued sequentially
//! from whichever task calls into the facade; the store's upsert
//! primitives keep find-or-create safe regardless.

use std::path::Path;

use chrono::Datelike;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::{self, NewSong};
use crate::error::{Error, Result};
use crate::metadata::{self, SongTags, UNKNOWN};
use crate::model::{PerformerKind, SongDetails};
use crate::query;
use crate::scanner;

/// Outcome of one mining run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MineReport {
    /// Files found by the scanner
    pub total: usize,
    /// Files cataloged
    pub mined: usize,
    /// Files skipped because their tags could not be read
    pub skipped: usize,
}

/// The catalog and its command surface.
pub struct Catalog {
    pool: SqlitePool,
}

impl Catalog {
    /// Open (creating if necessary) the catalog database at `db_url` and
    /// run migrations.
    pub async fn open(db_url: &str) -> Result<Self> {
        let pool = db::init_db(db_url).await?;
        Ok(Self { pool })
    }

    /// Wrap an already-initialized pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Mine every `.mp3` file under `root` into the catalog.
    ///
    /// Per-file tag failures are logged and skipped; one bad file never
    /// aborts the batch. After each file, `progress` receives the integer
    /// percentage of files handled so far.
    ///
    /// # Errors
    ///
    /// Fatal only when the directory scan itself fails or the store
    /// rejects an upsert.
    pub async fn mine<F>(&self, root: &Path, mut progress: F) -> Result<MineReport>
    where
        F: FnMut(u8),
    {
        let files = scanner::scan(root)?;
        let current_year = chrono::Local::now().year();

        let mut report = MineReport {
            total: files.len(),
            ..MineReport::default()
        };

        for (done, file) in files.iter().enumerate() {
            match metadata::read_raw(file) {
                Ok(raw) => {
                    let tags = metadata::normalize(raw, current_year);
                    self.catalog_file(file, &tags).await?;
                    report.mined += 1;
                }
                Err(e) => {
                    warn!(file = %file.display(), error = %e, "Skipping file");
                    report.skipped += 1;
                }
            }
            progress((((done + 1) * 100) / report.total) as u8);
        }

        info!(
            total = report.total,
            mined = report.mined,
            skipped = report.skipped,
            "Mining complete"
        );
        Ok(report)
    }

    /// Upsert one normalized file: performer, then album, then song.
    ///
    /// An absent artist tag (normalized to "Unknown") classifies the
    /// performer as Unknown; anything else starts as Person until the
    /// user says otherwise.
    async fn catalog_file(&self, file: &Path, tags: &SongTags) -> Result<i64> {
        let kind = if tags.artist == UNKNOWN {
            PerformerKind::Unknown
        } else {
            PerformerKind::Person
        };
        let performer_id = db::find_or_create_performer(&self.pool, kind, &tags.artist).await?;

        // The containing directory stands in for the album's location
        let album_path = file
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let album_id =
            db::find_or_create_album(&self.pool, &album_path, &tags.album, tags.year).await?;

        let song = NewSong {
            performer_id,
            album_id,
            path: file.to_string_lossy().into_owned(),
            title: tags.title.clone(),
            track: i64::from(tags.track.0),
            year: tags.year,
            genre: tags.genre.clone(),
        };
        Ok(db::find_or_create_song(&self.pool, &song).await?)
    }

    /// All songs with display names.
    pub async fn all_songs(&self) -> Result<Vec<SongDetails>> {
        Ok(db::all_songs(&self.pool).await?)
    }

    /// Faceted search. Each facet value is looked up independently and
    /// the results concatenated, in facet order: titles, artists, albums,
    /// years, genres. No deduplication or ranking.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidYear`] if a `ye:` value is not an integer.
    pub async fn search(&self, search: &str) -> Result<Vec<SongDetails>> {
        let parsed = query::parse(search);
        let mut songs = Vec::new();

        for title in &parsed.titles {
            songs.extend(db::search_by_title(&self.pool, title).await?);
        }
        for artist in &parsed.artists {
            songs.extend(db::search_by_performer(&self.pool, artist).await?);
        }
        for album in &parsed.albums {
            songs.extend(db::search_by_album(&self.pool, album).await?);
        }
        for year in &parsed.years {
            let year_num: i64 = year.parse().map_err(|_| Error::invalid_year(year))?;
            songs.extend(db::search_by_year(&self.pool, year_num).await?);
        }
        for genre in &parsed.genres {
            songs.extend(db::search_by_genre(&self.pool, genre).await?);
        }

        Ok(songs)
    }

    /// Overwrite a song's editable fields. Identity (path, performer,
    /// album) is never touched.
    pub async fn edit_song(
        &self,
        id: i64,
        title: &str,
        genre: &str,
        track: i64,
        year: i64,
    ) -> Result<()> {
        match db::update_song(&self.pool, id, title, genre, track, year).await? {
            0 => Err(Error::not_found("song", id)),
            _ => Ok(()),
        }
    }

    /// Overwrite an album's name and year.
    pub async fn edit_album(&self, id: i64, name: &str, year: i64) -> Result<()> {
        match db::update_album(&self.pool, id, name, year).await? {
            0 => Err(Error::not_found("album", id)),
            _ => Ok(()),
        }
    }

    /// Classify a performer as a person and record their biography.
    pub async fn define_person_performer(
        &self,
        performer_id: i64,
        stage_name: &str,
        real_name: &str,
        birth_date: &str,
        death_date: &str,
    ) -> Result<()> {
        if db::update_performer(&self.pool, performer_id, PerformerKind::Person, stage_name)
            .await?
            == 0
        {
            return Err(Error::not_found("performer", performer_id));
        }
        db::find_or_create_person(&self.pool, stage_name, real_name, birth_date, death_date)
            .await?;
        Ok(())
    }

    /// Classify a performer as a group and record its biography.
    pub async fn define_group_performer(
        &self,
        performer_id: i64,
        name: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<()> {
        if db::update_performer(&self.pool, performer_id, PerformerKind::Group, name).await? == 0 {
            return Err(Error::not_found("performer", performer_id));
        }
        db::find_or_create_group(&self.pool, name, start_date, end_date).await?;
        Ok(())
    }

    /// Rename a performer without reclassifying it.
    pub async fn rename_performer(&self, id: i64, name: &str) -> Result<()> {
        match db::rename_performer(&self.pool, id, name).await? {
            0 => Err(Error::not_found("performer", id)),
            _ => Ok(()),
        }
    }

    /// Record that the person identified by the biographical tuple belongs
    /// to the named group.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if either the person or the group has not been
    /// defined yet.
    pub async fn add_person_to_group(
        &self,
        stage_name: &str,
        real_name: &str,
        birth_date: &str,
        death_date: &str,
        group_name: &str,
    ) -> Result<()> {
        let person_id =
            db::find_person(&self.pool, stage_name, real_name, birth_date, death_date)
                .await?
                .ok_or_else(|| Error::not_found("person", stage_name))?;
        let group_id = db::find_group_by_name(&self.pool, group_name)
            .await?
            .ok_or_else(|| Error::not_found("group", group_name))?;

        Ok(db::add_person_to_group(&self.pool, person_id, group_id).await?)
    }

    /// Display name of a performer, by primary key.
    pub async fn performer_name(&self, id: i64) -> Result<String> {
        db::performer_name(&self.pool, id)
            .await?
            .ok_or_else(|| Error::not_found("performer", id))
    }

    /// Display name of an album, by primary key.
    pub async fn album_name(&self, id: i64) -> Result<String> {
        db::album_name(&self.pool, id)
            .await?
            .ok_or_else(|| Error::not_found("album", id))
    }
}
