//! Windows editor install locations
//!
//! Locations are derived from the installer conventions: the user-level
//! setup lands under %LOCALAPPDATA%\Programs, the system-level one under
//! %ProgramFiles%. Only entries whose base environment variable is set
//! become candidates.

use std::path::Path;

use crate::editor::locator::EditorCandidate;

const INSTALL_SUFFIX: &str = r"Microsoft VS Code\bin\code.cmd";

const BASE_VARS: &[(&str, &str)] = &[
    ("LOCALAPPDATA", r"Programs\Microsoft VS Code\bin\code.cmd"),
    ("ProgramFiles", INSTALL_SUFFIX),
    ("ProgramFiles(x86)", INSTALL_SUFFIX),
];

pub(crate) fn install_candidates() -> Vec<EditorCandidate> {
    BASE_VARS
        .iter()
        .filter_map(|(var, suffix)| {
            std::env::var(var).ok().map(|base| {
                EditorCandidate::at_path(
                    "Visual Studio Code",
                    Path::new(&base).join(suffix).to_string_lossy().to_string(),
                )
            })
        })
        .collect()
}
