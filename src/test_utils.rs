//! Test utilities and fixtures for music-cataloger tests.
//!
//! Provides common test helpers and database fixtures to reduce
//! boilerplate in tests.

use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::db::NewSong;
use crate::metadata::SongTags;
use crate::model::PerformerKind;

/// Creates a temporary database for testing.
///
/// The database lives in a temporary directory that is cleaned up when
/// the returned `TempDir` is dropped; keep it alive for the duration of
/// the test. Migrations are run automatically.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Creates a fully-populated SongTags with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let tags = SongTags {
///     title: "Custom".to_string(),
///     ..mock_song_tags()
/// };
/// ```
pub fn mock_song_tags() -> SongTags {
    SongTags {
        title: "Test Song".to_string(),
        artist: "Test Performer".to_string(),
        album: "Test Album".to_string(),
        album_artist: "Test Performer".to_string(),
        genre: "Rock".to_string(),
        comment: "Unknown".to_string(),
        composer: "Unknown".to_string(),
        year: 1999,
        track: (1, 12),
        disc: (1, 1),
    }
}

/// Creates a NewSong whose performer and album rows already exist.
pub async fn mock_new_song(pool: &SqlitePool) -> NewSong {
    let performer_id =
        crate::db::find_or_create_performer(pool, PerformerKind::Person, "Test Performer")
            .await
            .expect("Failed to create performer");
    let album_id = crate::db::find_or_create_album(pool, "/music/test", "Test Album", 1999)
        .await
        .expect("Failed to create album");

    NewSong {
        performer_id,
        album_id,
        path: "/music/test/song.mp3".to_string(),
        title: "Test Song".to_string(),
        track: 1,
        year: 1999,
        genre: "Rock".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;

        let songs = crate::db::all_songs(&pool).await.unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_mock_new_song_references_existing_rows() {
        let (pool, _dir) = temp_db().await;

        let song = mock_new_song(&pool).await;
        assert!(song.performer_id > 0);
        assert!(song.album_id > 0);

        let id = crate::db::find_or_create_song(&pool, &song).await.unwrap();
        assert!(id > 0);
    }

    #[test]
    fn test_mock_song_tags_defaults() {
        let tags = mock_song_tags();
        assert_eq!(tags.title, "Test Song");
        assert_eq!(tags.artist, "Test Performer");
        assert_eq!(tags.track, (1, 12));
    }
}
