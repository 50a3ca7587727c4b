//! Registry persistence
//!
//! The registry lives in a single pretty-printed JSON array so it stays
//! human-editable. Every save rewrites the whole snapshot through a
//! temp-then-rename so a crash can't leave a truncated document.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{CodetrayError, Result};
use crate::registry::models::ProjectRecord;
use crate::utils;

const REGISTRY_FILE: &str = "projects.json";

/// On-disk home of the project registry
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform application-data location
    pub fn at_default_path() -> Result<Self> {
        let config_dir = directories::ProjectDirs::from("com", "krona", "codetray")
            .ok_or_else(|| {
                CodetrayError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    "could not determine the application config directory",
                ))
            })?
            .config_dir()
            .to_path_buf();

        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(REGISTRY_FILE)))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load all records from disk
    ///
    /// A missing file is an empty registry, not an error. A file that
    /// exists but doesn't parse is reported as `RegistryCorrupt` and
    /// left untouched for manual inspection.
    pub fn load(&self) -> Result<Vec<ProjectRecord>> {
        if !self.path.exists() {
            debug!("no registry file at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let records: Vec<ProjectRecord> =
            serde_json::from_str(&content).map_err(|source| CodetrayError::RegistryCorrupt {
                path: self.path.display().to_string(),
                source,
            })?;

        debug!("loaded {} projects from {:?}", records.len(), self.path);
        Ok(records)
    }

    /// Persist the full snapshot
    pub fn save(&self, records: &[ProjectRecord]) -> Result<()> {
        let content = serde_json::to_string_pretty(records)?;

        utils::fs::write_atomic(&self.path, &content).map_err(|source| {
            CodetrayError::persistence("project registry", self.path.display().to_string(), source)
        })?;

        info!("saved {} projects to {:?}", records.len(), self.path);
        Ok(())
    }
}
