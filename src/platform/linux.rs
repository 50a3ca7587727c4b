//! Linux editor install locations
//!
//! Covers distro packages, snap, the Flatpak exported shim, and
//! per-user installs under the home directory.

use crate::editor::locator::EditorCandidate;
use crate::utils::paths::expand_tilde;

const INSTALL_LOCATIONS: &[&str] = &[
    "/usr/bin/code",
    "/usr/local/bin/code",
    "/snap/bin/code",
    "/var/lib/flatpak/exports/bin/com.visualstudio.code",
    "~/.local/bin/code",
];

pub(crate) fn install_candidates() -> Vec<EditorCandidate> {
    INSTALL_LOCATIONS
        .iter()
        .map(|location| EditorCandidate::at_path("Visual Studio Code", expand_tilde(location)))
        .collect()
}
