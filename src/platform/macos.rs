//! macOS editor install locations
//!
//! Covers the app bundle CLI shim under /Applications (system-wide and
//! per-user installs) plus the Homebrew symlink prefix.

use crate::editor::locator::EditorCandidate;
use crate::utils::paths::expand_tilde;

const INSTALL_LOCATIONS: &[&str] = &[
    "/Applications/Visual Studio Code.app/Contents/Resources/app/bin/code",
    "~/Applications/Visual Studio Code.app/Contents/Resources/app/bin/code",
    "/usr/local/bin/code",
    "/opt/homebrew/bin/code",
];

pub(crate) fn install_candidates() -> Vec<EditorCandidate> {
    INSTALL_LOCATIONS
        .iter()
        .map(|location| EditorCandidate::at_path("Visual Studio Code", expand_tilde(location)))
        .collect()
}
