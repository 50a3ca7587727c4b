//! External editor launching
//!
//! Spawns the discovered editor as a detached process so it outlives
//! this one. The launcher never waits on the child and captures no
//! output; a hung editor is not its concern once the spawn succeeded.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{info, warn};

use crate::editor::locator::{EditorCommand, EditorLocator};
use crate::error::{CodetrayError, Result};

#[cfg(windows)]
use std::os::windows::process::CommandExt;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Opens projects in the discovered external editor
pub struct Launcher {
    locator: EditorLocator,
}

impl Launcher {
    pub fn new() -> Self {
        Self::with_locator(EditorLocator::new())
    }

    pub fn with_locator(locator: EditorLocator) -> Self {
        Self { locator }
    }

    /// Open a project directory in the editor
    ///
    /// Resolves an editor on demand; `EditorNotFound` is returned before
    /// any spawn is attempted. If spawning fails because the cached
    /// command no longer exists, discovery runs once more before the
    /// failure is surfaced as `SpawnFailed`.
    pub fn open(&mut self, project_path: &Path) -> Result<()> {
        let editor = self.locator.resolve()?;

        match spawn_detached(&editor, project_path) {
            Ok(()) => {
                info!("opened {} in {}", project_path.display(), editor.name);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(
                    "cached editor command '{}' vanished, re-probing",
                    editor.command
                );
                self.locator.invalidate();
                let editor = self.locator.resolve()?;

                spawn_detached(&editor, project_path)
                    .map_err(|source| CodetrayError::spawn_failed(&editor.command, source))?;
                info!("opened {} in {}", project_path.display(), editor.name);
                Ok(())
            }
            Err(source) => Err(CodetrayError::spawn_failed(&editor.command, source)),
        }
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments for opening a project
///
/// A new window is always forced; reusing an existing one would steal
/// focus from whatever session happens to own it.
fn new_window_args(project_path: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--new-window"),
        project_path.as_os_str().to_os_string(),
    ]
}

fn spawn_detached(editor: &EditorCommand, project_path: &Path) -> io::Result<()> {
    let mut command = build_command(editor, project_path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // The child handle is dropped without waiting; the editor keeps
    // running after this process exits.
    command.spawn().map(|_| ())
}

#[cfg(not(windows))]
fn build_command(editor: &EditorCommand, project_path: &Path) -> Command {
    let mut command = Command::new(&editor.command);
    command.args(new_window_args(project_path));
    command
}

#[cfg(windows)]
fn build_command(editor: &EditorCommand, project_path: &Path) -> Command {
    // `code` installs as a .cmd shim on Windows, which only cmd.exe can run
    let mut command = Command::new("cmd");
    command
        .arg("/C")
        .arg(&editor.command)
        .args(new_window_args(project_path))
        .creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    command
}
