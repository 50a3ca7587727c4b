//! Codetray - the core of a cross-platform project launcher
//!
//! Tracks a list of project directories, classifies each by its marker
//! files, discovers a working external editor, and opens projects in it
//! as detached processes. The tray shell (icon, menus, notifications,
//! auto-start registration) lives outside this crate and drives it
//! through [`registry::ProjectRegistry`], [`editor::Launcher`], and
//! [`settings::SettingsStore`].

pub mod detector;
pub mod editor;
pub mod error;
pub mod logging;
pub mod platform;
pub mod registry;
pub mod settings;
pub mod utils;

pub use error::{CodetrayError, Result};
