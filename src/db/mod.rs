//! Catalog store: song, performer, album, and group persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Find-or-create upserts keyed by natural identity
//! - Field edits by primary key
//! - Faceted search joined with display names
//!
//! Natural-key lookups return `Option<i64>` on miss; the facade layer
//! decides whether a miss is an error. Find-or-create is backed by UNIQUE
//! constraints plus `INSERT .. ON CONFLICT .. RETURNING id`, so two racing
//! callers cannot produce duplicate rows.

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::model::{PerformerKind, SongDetails};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "music_cataloger.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current
/// directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations. The
/// initial migration seeds the `types` reference table.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

// ---------------------------------------------------------------------------
// Performers
// ---------------------------------------------------------------------------

/// Look up a performer by exact name. Name is the natural key.
pub async fn find_performer_by_name(pool: &SqlitePool, name: &str) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM performers WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id,)| id))
}

/// Insert a performer row. Fails on a duplicate name.
pub async fn insert_performer(
    pool: &SqlitePool,
    kind: PerformerKind,
    name: &str,
) -> sqlx::Result<i64> {
    let result = sqlx::query("INSERT INTO performers (type_id, name) VALUES (?, ?)")
        .bind(kind.as_i64())
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Get or create a performer by name.
///
/// Idempotent: calling with the same name always returns the same ID. An
/// existing performer keeps its stored classification - `kind` only
/// applies when the row is first created, so mining never downgrades a
/// performer the user already classified.
pub async fn find_or_create_performer(
    pool: &SqlitePool,
    kind: PerformerKind,
    name: &str,
) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO performers (type_id, name)
        VALUES (?, ?)
        ON CONFLICT(name) DO UPDATE SET name = excluded.name
        RETURNING id
        "#,
    )
    .bind(kind.as_i64())
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Overwrite a performer's classification and name.
///
/// Returns the number of rows affected (0 when the id does not exist).
pub async fn update_performer(
    pool: &SqlitePool,
    id: i64,
    kind: PerformerKind,
    name: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE performers SET type_id = ?, name = ? WHERE id = ?")
        .bind(kind.as_i64())
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Overwrite a performer's name only.
pub async fn rename_performer(pool: &SqlitePool, id: i64, name: &str) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE performers SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Display name of a performer by primary key.
pub async fn performer_name(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT name FROM performers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(name,)| name))
}

// ---------------------------------------------------------------------------
// Albums
// ---------------------------------------------------------------------------

/// Look up an album by its (name, year) natural key.
pub async fn find_album_by_name_year(
    pool: &SqlitePool,
    name: &str,
    year: i64,
) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM albums WHERE name = ? AND year = ?")
        .bind(name)
        .bind(year)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id,)| id))
}

/// Insert an album row. Fails on a duplicate (name, year).
pub async fn insert_album(
    pool: &SqlitePool,
    path: &str,
    name: &str,
    year: i64,
) -> sqlx::Result<i64> {
    let result = sqlx::query("INSERT INTO albums (path, name, year) VALUES (?, ?, ?)")
        .bind(path)
        .bind(name)
        .bind(year)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Get or create an album by (name, year).
///
/// `path` is stored only when the row is first created; a different path
/// on a later call is discarded, since path is not part of the identity.
pub async fn find_or_create_album(
    pool: &SqlitePool,
    path: &str,
    name: &str,
    year: i64,
) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO albums (path, name, year)
        VALUES (?, ?, ?)
        ON CONFLICT(name, year) DO UPDATE SET name = excluded.name
        RETURNING id
        "#,
    )
    .bind(path)
    .bind(name)
    .bind(year)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Overwrite an album's name and year.
pub async fn update_album(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    year: i64,
) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE albums SET name = ?, year = ? WHERE id = ?")
        .bind(name)
        .bind(year)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Display name of an album by primary key.
pub async fn album_name(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT name FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(name,)| name))
}

// ---------------------------------------------------------------------------
// Songs
// ---------------------------------------------------------------------------

/// A song record to look up or insert. Every field below the surrogate id
/// participates in the natural identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub performer_id: i64,
    pub album_id: i64,
    pub path: String,
    pub title: String,
    pub track: i64,
    pub year: i64,
    pub genre: String,
}

/// Look up a song by its full natural tuple.
pub async fn find_song(pool: &SqlitePool, song: &NewSong) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT id FROM rolas
        WHERE performer_id = ? AND album_id = ? AND path = ?
          AND title = ? AND track = ? AND year = ? AND genre = ?
        "#,
    )
    .bind(song.performer_id)
    .bind(song.album_id)
    .bind(&song.path)
    .bind(&song.title)
    .bind(song.track)
    .bind(song.year)
    .bind(&song.genre)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id,)| id))
}

/// Insert a song row. Fails on a duplicate tuple.
pub async fn insert_song(pool: &SqlitePool, song: &NewSong) -> sqlx::Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO rolas (performer_id, album_id, path, title, track, year, genre)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(song.performer_id)
    .bind(song.album_id)
    .bind(&song.path)
    .bind(&song.title)
    .bind(song.track)
    .bind(song.year)
    .bind(&song.genre)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Get or create a song by its full tuple.
///
/// Idempotent only when the entire tuple matches; changing any one field
/// produces a distinct row.
pub async fn find_or_create_song(pool: &SqlitePool, song: &NewSong) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO rolas (performer_id, album_id, path, title, track, year, genre)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(performer_id, album_id, path, title, track, year, genre)
            DO UPDATE SET path = excluded.path
        RETURNING id
        "#,
    )
    .bind(song.performer_id)
    .bind(song.album_id)
    .bind(&song.path)
    .bind(&song.title)
    .bind(song.track)
    .bind(song.year)
    .bind(&song.genre)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Overwrite a song's editable fields. Path, performer, and album are part
/// of the song's identity and are never touched by edits.
pub async fn update_song(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    genre: &str,
    track: i64,
    year: i64,
) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE rolas SET title = ?, track = ?, year = ?, genre = ? WHERE id = ?")
        .bind(title)
        .bind(track)
        .bind(year)
        .bind(genre)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// ---------------------------------------------------------------------------
// Persons, groups, memberships
// ---------------------------------------------------------------------------

/// Insert a person's biographical record.
pub async fn define_person(
    pool: &SqlitePool,
    stage_name: &str,
    real_name: &str,
    birth_date: &str,
    death_date: &str,
) -> sqlx::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO persons (stage_name, real_name, birth_date, death_date) VALUES (?, ?, ?, ?)",
    )
    .bind(stage_name)
    .bind(real_name)
    .bind(birth_date)
    .bind(death_date)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Look up a person by their full biographical tuple.
pub async fn find_person(
    pool: &SqlitePool,
    stage_name: &str,
    real_name: &str,
    birth_date: &str,
    death_date: &str,
) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT id FROM persons
        WHERE stage_name = ? AND real_name = ? AND birth_date = ? AND death_date = ?
        "#,
    )
    .bind(stage_name)
    .bind(real_name)
    .bind(birth_date)
    .bind(death_date)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id,)| id))
}

/// Get or create a person by their biographical tuple.
pub async fn find_or_create_person(
    pool: &SqlitePool,
    stage_name: &str,
    real_name: &str,
    birth_date: &str,
    death_date: &str,
) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO persons (stage_name, real_name, birth_date, death_date)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(stage_name, real_name, birth_date, death_date)
            DO UPDATE SET stage_name = excluded.stage_name
        RETURNING id
        "#,
    )
    .bind(stage_name)
    .bind(real_name)
    .bind(birth_date)
    .bind(death_date)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Insert a group's biographical record.
pub async fn define_group(
    pool: &SqlitePool,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> sqlx::Result<i64> {
    let result =
        sqlx::query("INSERT INTO groups (name, start_date, end_date) VALUES (?, ?, ?)")
            .bind(name)
            .bind(start_date)
            .bind(end_date)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

/// Look up a group by its full tuple.
pub async fn find_group(
    pool: &SqlitePool,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM groups WHERE name = ? AND start_date = ? AND end_date = ?",
    )
    .bind(name)
    .bind(start_date)
    .bind(end_date)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(id,)| id))
}

/// Get or create a group by its tuple.
pub async fn find_or_create_group(
    pool: &SqlitePool,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO groups (name, start_date, end_date)
        VALUES (?, ?, ?)
        ON CONFLICT(name, start_date, end_date) DO UPDATE SET name = excluded.name
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

/// Look up a group by name alone, for membership edits.
pub async fn find_group_by_name(pool: &SqlitePool, name: &str) -> sqlx::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM groups WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(id,)| id))
}

/// Record a person's membership in a group. Fails if the pair is already
/// recorded (composite primary key).
pub async fn add_person_to_group(
    pool: &SqlitePool,
    person_id: i64,
    group_id: i64,
) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO in_group (person_id, group_id) VALUES (?, ?)")
        .bind(person_id)
        .bind(group_id)
        .execute(pool)
        .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing and search
// ---------------------------------------------------------------------------

const SONG_DETAILS_SELECT: &str = r#"
    SELECT r.id, r.performer_id, r.album_id, r.path, r.title, r.track, r.year, r.genre,
           p.name AS performer_name,
           a.name AS album_name
    FROM rolas r
    JOIN performers p ON r.performer_id = p.id
    JOIN albums a ON r.album_id = a.id
"#;

/// Get all songs with performer and album names.
///
/// Songs always reference existing performer and album rows, so plain
/// JOINs are safe. This is the primary method for loading the catalog for
/// display.
pub async fn all_songs(pool: &SqlitePool) -> sqlx::Result<Vec<SongDetails>> {
    sqlx::query_as::<_, SongDetails>(SONG_DETAILS_SELECT)
        .fetch_all(pool)
        .await
}

/// Songs whose title contains `title` (case-insensitive).
pub async fn search_by_title(pool: &SqlitePool, title: &str) -> sqlx::Result<Vec<SongDetails>> {
    let sql = format!("{SONG_DETAILS_SELECT} WHERE r.title LIKE ?");
    sqlx::query_as::<_, SongDetails>(&sql)
        .bind(format!("%{title}%"))
        .fetch_all(pool)
        .await
}

/// Songs whose performer name contains `name` (case-insensitive).
pub async fn search_by_performer(pool: &SqlitePool, name: &str) -> sqlx::Result<Vec<SongDetails>> {
    let sql = format!("{SONG_DETAILS_SELECT} WHERE p.name LIKE ?");
    sqlx::query_as::<_, SongDetails>(&sql)
        .bind(format!("%{name}%"))
        .fetch_all(pool)
        .await
}

/// Songs whose album name contains `name` (case-insensitive).
pub async fn search_by_album(pool: &SqlitePool, name: &str) -> sqlx::Result<Vec<SongDetails>> {
    let sql = format!("{SONG_DETAILS_SELECT} WHERE a.name LIKE ?");
    sqlx::query_as::<_, SongDetails>(&sql)
        .bind(format!("%{name}%"))
        .fetch_all(pool)
        .await
}

/// Songs from exactly `year`.
pub async fn search_by_year(pool: &SqlitePool, year: i64) -> sqlx::Result<Vec<SongDetails>> {
    let sql = format!("{SONG_DETAILS_SELECT} WHERE r.year = ?");
    sqlx::query_as::<_, SongDetails>(&sql)
        .bind(year)
        .fetch_all(pool)
        .await
}

/// Songs whose genre contains `genre` (case-insensitive).
pub async fn search_by_genre(pool: &SqlitePool, genre: &str) -> sqlx::Result<Vec<SongDetails>> {
    let sql = format!("{SONG_DETAILS_SELECT} WHERE r.genre LIKE ?");
    sqlx::query_as::<_, SongDetails>(&sql)
        .bind(format!("%{genre}%"))
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_new_song, temp_db};

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        sqlx::query_scalar(&sql).fetch_one(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_init_db_seeds_types() {
        let (pool, _dir) = temp_db().await;

        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, description FROM types ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(
            rows,
            vec![
                (0, "Person".to_string()),
                (1, "Group".to_string()),
                (2, "Unknown".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_find_or_create_performer_is_idempotent() {
        let (pool, _dir) = temp_db().await;

        let id1 = find_or_create_performer(&pool, PerformerKind::Person, "Performer1")
            .await
            .unwrap();
        let id2 = find_or_create_performer(&pool, PerformerKind::Person, "Performer1")
            .await
            .unwrap();
        assert_eq!(id1, id2);
        assert_eq!(count(&pool, "performers").await, 1);

        let id3 = find_or_create_performer(&pool, PerformerKind::Person, "Performer2")
            .await
            .unwrap();
        assert_ne!(id1, id3);
    }

    #[tokio::test]
    async fn test_find_or_create_performer_keeps_existing_kind() {
        let (pool, _dir) = temp_db().await;

        let id = find_or_create_performer(&pool, PerformerKind::Group, "The Quiet Ones")
            .await
            .unwrap();
        // Mining the same name again as Person must not reclassify
        find_or_create_performer(&pool, PerformerKind::Person, "The Quiet Ones")
            .await
            .unwrap();

        let (type_id,): (i64,) = sqlx::query_as("SELECT type_id FROM performers WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(PerformerKind::from_i64(type_id), PerformerKind::Group);
    }

    #[tokio::test]
    async fn test_find_performer_by_name_miss_is_none() {
        let (pool, _dir) = temp_db().await;
        let found = find_performer_by_name(&pool, "nobody").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_or_create_album_discards_path_on_second_call() {
        let (pool, _dir) = temp_db().await;

        let id1 = find_or_create_album(&pool, "/music/a", "Album1", 1999)
            .await
            .unwrap();
        let id2 = find_or_create_album(&pool, "/somewhere/else", "Album1", 1999)
            .await
            .unwrap();
        assert_eq!(id1, id2);
        assert_eq!(count(&pool, "albums").await, 1);

        let (path,): (String,) = sqlx::query_as("SELECT path FROM albums WHERE id = ?")
            .bind(id1)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(path, "/music/a");
    }

    #[tokio::test]
    async fn test_same_album_name_different_year_is_distinct() {
        let (pool, _dir) = temp_db().await;

        let id1 = find_or_create_album(&pool, "/music/a", "Album1", 1999)
            .await
            .unwrap();
        let id2 = find_or_create_album(&pool, "/music/a", "Album1", 2000)
            .await
            .unwrap();
        assert_ne!(id1, id2);
    }

    #[tokio::test]
    async fn test_find_or_create_song_full_tuple_identity() {
        let (pool, _dir) = temp_db().await;
        let song = mock_new_song(&pool).await;

        let id1 = find_or_create_song(&pool, &song).await.unwrap();
        let id2 = find_or_create_song(&pool, &song).await.unwrap();
        assert_eq!(id1, id2);
        assert_eq!(count(&pool, "rolas").await, 1);

        // Changing any one field produces a distinct row
        let mut changed = song.clone();
        changed.year += 1;
        let id3 = find_or_create_song(&pool, &changed).await.unwrap();
        assert_ne!(id1, id3);
        assert_eq!(count(&pool, "rolas").await, 2);
    }

    #[tokio::test]
    async fn test_update_song_changes_only_editable_fields() {
        let (pool, _dir) = temp_db().await;
        let song = mock_new_song(&pool).await;
        let id = find_or_create_song(&pool, &song).await.unwrap();

        let affected = update_song(&pool, id, "New Title", "Jazz", 7, 2001)
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let row: crate::model::Song = sqlx::query_as("SELECT * FROM rolas WHERE id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.title, "New Title");
        assert_eq!(row.genre, "Jazz");
        assert_eq!(row.track, 7);
        assert_eq!(row.year, 2001);
        // Identity fields untouched
        assert_eq!(row.path, song.path);
        assert_eq!(row.performer_id, song.performer_id);
        assert_eq!(row.album_id, song.album_id);
    }

    #[tokio::test]
    async fn test_update_missing_ids_affect_zero_rows() {
        let (pool, _dir) = temp_db().await;

        assert_eq!(update_song(&pool, 999, "t", "g", 1, 2000).await.unwrap(), 0);
        assert_eq!(update_album(&pool, 999, "n", 2000).await.unwrap(), 0);
        assert_eq!(
            update_performer(&pool, 999, PerformerKind::Person, "n")
                .await
                .unwrap(),
            0
        );
        assert_eq!(rename_performer(&pool, 999, "n").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_name_lookups_by_primary_key() {
        let (pool, _dir) = temp_db().await;

        let pid = insert_performer(&pool, PerformerKind::Person, "Performer1")
            .await
            .unwrap();
        let aid = insert_album(&pool, "/music/a", "Album1", 1999).await.unwrap();

        assert_eq!(
            performer_name(&pool, pid).await.unwrap().as_deref(),
            Some("Performer1")
        );
        assert_eq!(album_name(&pool, aid).await.unwrap().as_deref(), Some("Album1"));
        assert!(performer_name(&pool, 999).await.unwrap().is_none());
        assert!(album_name(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_year_exact_match() {
        let (pool, _dir) = temp_db().await;
        let mut song = mock_new_song(&pool).await;
        song.year = 1901;
        find_or_create_song(&pool, &song).await.unwrap();

        let hits = search_by_year(&pool, 1901).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].year, 1901);

        let misses = search_by_year(&pool, 1900).await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_title_substring_case_insensitive() {
        let (pool, _dir) = temp_db().await;
        let mut song = mock_new_song(&pool).await;
        song.title = "Midnight Train".to_string();
        find_or_create_song(&pool, &song).await.unwrap();

        assert_eq!(search_by_title(&pool, "night").await.unwrap().len(), 1);
        assert_eq!(search_by_title(&pool, "NIGHT").await.unwrap().len(), 1);
        assert!(search_by_title(&pool, "daylight").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_joins_display_names() {
        let (pool, _dir) = temp_db().await;
        let song = mock_new_song(&pool).await;
        find_or_create_song(&pool, &song).await.unwrap();

        let hits = search_by_performer(&pool, "Test").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].performer_name, "Test Performer");
        assert_eq!(hits[0].album_name, "Test Album");

        let by_genre = search_by_genre(&pool, "rock").await.unwrap();
        assert_eq!(by_genre.len(), 1);

        let by_album = search_by_album(&pool, "Test Album").await.unwrap();
        assert_eq!(by_album.len(), 1);
    }

    #[tokio::test]
    async fn test_all_songs_lists_everything() {
        let (pool, _dir) = temp_db().await;
        let song = mock_new_song(&pool).await;
        find_or_create_song(&pool, &song).await.unwrap();
        let mut other = song.clone();
        other.title = "Second".to_string();
        find_or_create_song(&pool, &other).await.unwrap();

        let songs = all_songs(&pool).await.unwrap();
        assert_eq!(songs.len(), 2);
    }

    #[tokio::test]
    async fn test_person_and_group_find_or_create() {
        let (pool, _dir) = temp_db().await;

        let p1 = find_or_create_person(&pool, "Stage", "Real", "1970-01-01", "0")
            .await
            .unwrap();
        let p2 = find_or_create_person(&pool, "Stage", "Real", "1970-01-01", "0")
            .await
            .unwrap();
        assert_eq!(p1, p2);
        assert_eq!(count(&pool, "persons").await, 1);

        let g1 = find_or_create_group(&pool, "The Quiet Ones", "1990", "0")
            .await
            .unwrap();
        let g2 = find_or_create_group(&pool, "The Quiet Ones", "1990", "0")
            .await
            .unwrap();
        assert_eq!(g1, g2);

        assert_eq!(
            find_group_by_name(&pool, "The Quiet Ones").await.unwrap(),
            Some(g1)
        );
        assert!(find_group_by_name(&pool, "Nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_person_to_group_records_membership() {
        let (pool, _dir) = temp_db().await;

        let person = define_person(&pool, "Stage", "Real", "1970-01-01", "0")
            .await
            .unwrap();
        let group = define_group(&pool, "The Quiet Ones", "1990", "0")
            .await
            .unwrap();

        add_person_to_group(&pool, person, group).await.unwrap();
        assert_eq!(count(&pool, "in_group").await, 1);

        // Composite primary key rejects the duplicate pair
        assert!(add_person_to_group(&pool, person, group).await.is_err());
    }
}
