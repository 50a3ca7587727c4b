//! Editor binary discovery
//!
//! Probes an ordered, declarative list of candidates until one works.
//! Each candidate carries its own probe strategy, so new platforms or
//! install layouts are additive configuration rather than new branching
//! logic. The first hit is cached for the rest of the process.

use once_cell::sync::Lazy;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, info};
use wait_timeout::ChildExt;
use which::which;

use crate::error::{CodetrayError, Result};
use crate::platform;

/// How a candidate is checked for usability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStrategy {
    /// Absolute install location; a plain existence check
    PathExists,
    /// Bare command expected on PATH; executed with a version-query
    /// flag, success means a zero exit within the timeout
    VersionQuery { timeout: Duration },
}

/// One entry in the ordered discovery list
#[derive(Debug, Clone)]
pub struct EditorCandidate {
    /// Human-readable editor name
    pub name: &'static str,
    /// Bare command name or absolute path
    pub command: String,
    pub probe: ProbeStrategy,
}

impl EditorCandidate {
    /// A bare PATH command probed by executing `--version`
    pub fn on_path(name: &'static str, command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            name,
            command: command.into(),
            probe: ProbeStrategy::VersionQuery { timeout },
        }
    }

    /// A well-known absolute install location probed by existence
    pub fn at_path(name: &'static str, path: impl Into<String>) -> Self {
        Self {
            name,
            command: path.into(),
            probe: ProbeStrategy::PathExists,
        }
    }
}

/// A discovered, usable editor invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub name: String,
    pub command: String,
}

static DEFAULT_CANDIDATES: Lazy<Vec<EditorCandidate>> = Lazy::new(platform::editor_candidates);

/// Discovers a working editor binary and caches the result
pub struct EditorLocator {
    candidates: Vec<EditorCandidate>,
    cached: Option<EditorCommand>,
    probes_attempted: usize,
}

impl EditorLocator {
    /// Locator over the platform's default candidate list
    pub fn new() -> Self {
        Self::with_candidates(DEFAULT_CANDIDATES.clone())
    }

    /// Locator over an explicit candidate list
    pub fn with_candidates(candidates: Vec<EditorCandidate>) -> Self {
        Self {
            candidates,
            cached: None,
            probes_attempted: 0,
        }
    }

    /// Whether a previous `resolve` already found an editor
    pub fn is_resolved(&self) -> bool {
        self.cached.is_some()
    }

    /// Find a usable editor command
    ///
    /// Candidates are probed sequentially, each under its own bound, so
    /// the worst case is the sum of the per-candidate timeouts. Once a
    /// candidate succeeds it is cached and later calls perform no
    /// probing at all; use [`Self::invalidate`] to force re-discovery.
    pub fn resolve(&mut self) -> Result<EditorCommand> {
        if let Some(cached) = &self.cached {
            return Ok(cached.clone());
        }

        for index in 0..self.candidates.len() {
            let candidate = self.candidates[index].clone();
            self.probes_attempted += 1;

            if probe(&candidate) {
                info!("using editor '{}' via {}", candidate.name, candidate.command);
                let resolved = EditorCommand {
                    name: candidate.name.to_string(),
                    command: candidate.command,
                };
                self.cached = Some(resolved.clone());
                return Ok(resolved);
            }
            debug!("editor candidate failed probe: {}", candidate.command);
        }

        Err(CodetrayError::EditorNotFound)
    }

    /// Drop the cached command so the next `resolve` probes again
    ///
    /// Called after a launch failure shows the cached path went stale
    /// (editor uninstalled or moved since discovery).
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            debug!("editor cache invalidated");
        }
    }
}

impl Default for EditorLocator {
    fn default() -> Self {
        Self::new()
    }
}

fn probe(candidate: &EditorCandidate) -> bool {
    match candidate.probe {
        ProbeStrategy::PathExists => Path::new(&candidate.command).exists(),
        ProbeStrategy::VersionQuery { timeout } => probe_version_query(&candidate.command, timeout),
    }
}

/// Run `<command> --version` and require a zero exit within the bound
fn probe_version_query(command: &str, timeout: Duration) -> bool {
    // PATH lookup first; a missing command shouldn't cost a spawn
    let resolved = match which(command) {
        Ok(path) => path,
        Err(_) => return false,
    };

    let child = Command::new(&resolved)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(err) => {
            debug!("version probe of {:?} failed to start: {}", resolved, err);
            return false;
        }
    };

    match child.wait_timeout(timeout) {
        Ok(Some(status)) => status.success(),
        Ok(None) => {
            // Hung probe; reap it and move on to the next candidate
            let _ = child.kill();
            let _ = child.wait();
            false
        }
        Err(_) => false,
    }
}
