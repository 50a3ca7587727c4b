//! Custom error types for Codetray
//!
//! This module provides a unified error type used throughout the
//! registry, editor discovery, and launching components.

use thiserror::Error;

/// Main error type for Codetray operations
#[derive(Error, Debug)]
pub enum CodetrayError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Add called with a path that is already registered
    #[error("project already registered: {path}")]
    DuplicateProject { path: String },

    /// Remove/open called with an unknown path
    #[error("project not found: {path}")]
    ProjectNotFound { path: String },

    /// The on-disk registry document exists but is not parseable.
    /// The file is left untouched for manual inspection.
    #[error("registry file {path} is corrupt: {source}")]
    RegistryCorrupt {
        path: String,
        source: serde_json::Error,
    },

    /// No working editor binary was discovered
    #[error("no working editor found; install VS Code or make sure `code` is on PATH")]
    EditorNotFound,

    /// The OS rejected process creation for the editor
    #[error("failed to launch editor '{command}': {source}")]
    SpawnFailed {
        command: String,
        source: std::io::Error,
    },

    /// A registry or settings write failed; the in-memory state still
    /// reflects the intended change so a later persist can retry.
    #[error("failed to persist {what} to {path}: {source}")]
    PersistenceFailed {
        what: &'static str,
        path: String,
        source: std::io::Error,
    },
}

impl CodetrayError {
    /// Create a duplicate project error
    pub fn duplicate(path: impl Into<String>) -> Self {
        Self::DuplicateProject { path: path.into() }
    }

    /// Create a project not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::ProjectNotFound { path: path.into() }
    }

    /// Create a spawn failure error
    pub fn spawn_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a persistence failure error
    pub fn persistence(what: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::PersistenceFailed {
            what,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using CodetrayError
pub type Result<T> = std::result::Result<T, CodetrayError>;
