//! Registry data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detector::Ecosystem;

/// A tracked project directory and its metadata
///
/// `path` is the unique key; everything else is derived at add-time and
/// never re-evaluated, except the usage statistics which are bumped each
/// time the project is opened.
///
/// Older registry documents may be missing the optional fields, and
/// hand-edited ones may carry extras; both are tolerated on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Display label, derived from the final path segment (not unique)
    pub name: String,
    /// Absolute filesystem path; the unique key for the record
    pub path: String,
    /// Coarse classification, set once at add-time
    #[serde(default, rename = "ecosystemType", skip_serializing_if = "Option::is_none")]
    pub ecosystem: Option<Ecosystem>,
    /// Finer-grained tag within the ecosystem (e.g. "React")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Creation timestamp, immutable
    #[serde(default)]
    pub added_at: DateTime<Utc>,
    /// Last time the project was opened through the launcher
    #[serde(default)]
    pub last_opened: Option<DateTime<Utc>>,
    /// How many times the project has been opened
    #[serde(default)]
    pub open_count: u64,
}

impl ProjectRecord {
    /// Display label combining name and framework, e.g. "webapp (React)"
    pub fn label(&self) -> String {
        match &self.framework {
            Some(framework) => format!("{} ({})", self.name, framework),
            None => self.name.clone(),
        }
    }
}

/// Ordering choices for iterating the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// The order projects were added in
    #[default]
    Insertion,
    /// Lexicographic by lower-cased display name
    Name,
}

/// Aggregate usage figures over the whole registry
#[derive(Debug, Clone, Default)]
pub struct RegistryStats {
    pub total_projects: usize,
    pub projects_used: usize,
    pub total_opens: u64,
    /// Count per ecosystem/framework label, e.g. "Node.js (React)"
    pub by_kind: BTreeMap<String, usize>,
    /// (name, open count) of the most opened projects, descending
    pub most_used: Vec<(String, u64)>,
}
