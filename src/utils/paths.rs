//! Path utilities for Codetray
//!
//! This module contains utilities for working with file paths.

use std::path::{Path, PathBuf};

/// Expand tilde (~) to the user's home directory
///
/// # Arguments
/// * `path` - A path string that may start with ~/
///
/// # Returns
/// The expanded path string with ~ replaced by the home directory
pub fn expand_tilde(path: &str) -> String {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped).to_string_lossy().to_string();
        }
    } else if path == "~" {
        if let Some(home) = home_dir() {
            return home.to_string_lossy().to_string();
        }
    }
    path.to_string()
}

/// Get the user's home directory
///
/// Uses the `home` crate on macOS, falls back to directories crate otherwise
fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        home::home_dir()
    }
    #[cfg(not(target_os = "macos"))]
    {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

/// Extract the final component of a path
///
/// # Arguments
/// * `path` - A file or directory path
///
/// # Returns
/// The filename as a string, or None if the path ends in ".."
pub fn filename(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        // This test depends on the home directory existing
        let expanded = expand_tilde("~/test");
        assert!(!expanded.starts_with("~/"));
        assert!(expanded.ends_with("/test") || expanded.ends_with("\\test"));
    }

    #[test]
    fn test_expand_tilde_no_tilde() {
        let path = "/usr/local/bin";
        assert_eq!(expand_tilde(path), path);
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            filename(Path::new("/path/to/my-project")),
            Some("my-project".to_string())
        );
        assert_eq!(
            filename(Path::new("file.txt")),
            Some("file.txt".to_string())
        );
        assert_eq!(filename(Path::new("/path/..")), None);
    }
}
