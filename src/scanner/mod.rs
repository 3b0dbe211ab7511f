//! Recursive directory scanning for MP3 files.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;

/// Extension matched by the scanner. Exact, case-sensitive: `SONG.MP3`
/// is not collected.
const MP3_EXTENSION: &str = "mp3";

/// Recursively collect every regular file under `root` whose extension is
/// exactly `.mp3`, in the traversal's natural order.
///
/// # Errors
///
/// Fail-fast: a missing root or an unreadable subdirectory propagates as
/// [`crate::error::Error::Traversal`] and discards any paths collected so
/// far.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension() == Some(OsStr::new(MP3_EXTENSION))
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_scan_collects_mp3_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        File::create(root.join("song.mp3")).unwrap();
        File::create(root.join("notes.txt")).unwrap(); // Should be ignored
        File::create(root.join("cover.png")).unwrap(); // Should be ignored

        let subdir = root.join("subdir");
        std::fs::create_dir(&subdir).unwrap();
        File::create(subdir.join("track.mp3")).unwrap();

        let paths = scan(root).unwrap();
        assert_eq!(paths.len(), 2);

        let file_names: Vec<String> = paths
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(|s| s.to_string()))
            .collect();

        assert!(file_names.contains(&"song.mp3".to_string()));
        assert!(file_names.contains(&"track.mp3".to_string()));
    }

    #[test]
    fn test_scan_extension_match_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        File::create(root.join("loud.MP3")).unwrap();
        File::create(root.join("quiet.mp3")).unwrap();

        let paths = scan(root).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("quiet.mp3"));
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = scan(&missing);
        assert!(result.is_err());
    }

    #[test]
    fn test_scan_empty_directory_is_empty() {
        let dir = tempdir().unwrap();
        let paths = scan(dir.path()).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_scan_ignores_directories_named_like_mp3() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("not-a-file.mp3");
        std::fs::create_dir(&odd).unwrap();
        File::create(odd.join("inner.mp3")).unwrap();

        let paths = scan(dir.path()).unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("inner.mp3"));
    }
}
