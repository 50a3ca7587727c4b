//! External editor integration
//!
//! Discovery of a runnable editor binary and detached launching of
//! projects in it.

pub mod launcher;
pub mod locator;

pub use launcher::Launcher;
pub use locator::{EditorCandidate, EditorCommand, EditorLocator, ProbeStrategy};
