//! Platform-specific editor install locations
//!
//! Each platform contributes an ordered list of well-known absolute
//! install locations, built from its environment variables. The lists
//! are plain data: supporting a new platform or install layout means
//! adding entries, not new control flow.

use std::time::Duration;

use crate::editor::locator::EditorCandidate;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "windows")]
mod windows;

/// Upper bound for a single execute-and-check probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Ordered editor candidates for the current platform
///
/// The bare PATH command comes first (it reflects the user's own setup),
/// followed by the platform's install locations in descending
/// likelihood.
pub fn editor_candidates() -> Vec<EditorCandidate> {
    let mut candidates = vec![EditorCandidate::on_path(
        "Visual Studio Code",
        "code",
        PROBE_TIMEOUT,
    )];

    #[cfg(target_os = "macos")]
    candidates.extend(macos::install_candidates());

    #[cfg(target_os = "linux")]
    candidates.extend(linux::install_candidates());

    #[cfg(target_os = "windows")]
    candidates.extend(windows::install_candidates());

    candidates
}
