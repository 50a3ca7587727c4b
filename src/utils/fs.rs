//! Filesystem utilities for Codetray
//!
//! This module contains utilities for filesystem operations.

use std::fs;
use std::io;
use std::path::Path;

/// Write a string to a file atomically
///
/// The contents are written to a temporary sibling file first and then
/// renamed into place, so a crash mid-write never leaves a truncated
/// document behind. Parent directories are created if they don't exist.
///
/// # Arguments
/// * `path` - Destination path
/// * `contents` - String contents to write
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("doc.json");

        write_atomic(&path, "[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");

        write_atomic(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        // No temp residue left behind
        assert!(!path.with_extension("tmp").exists());
    }
}
