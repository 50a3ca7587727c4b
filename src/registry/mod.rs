//! Project registry
//!
//! An ordered collection of tracked project directories, persisted as a
//! whole JSON snapshot on every mutation. The in-memory list is owned
//! exclusively by [`ProjectRegistry`]; all changes flow through its API
//! so the path-uniqueness invariant and persistence stay centralized.

pub mod models;
pub mod store;

use chrono::Utc;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::detector;
use crate::error::{CodetrayError, Result};
use crate::utils;

pub use models::{ListOrder, ProjectRecord, RegistryStats};
pub use store::RegistryStore;

/// The registry of tracked projects
pub struct ProjectRegistry {
    records: Vec<ProjectRecord>,
    store: RegistryStore,
}

impl ProjectRegistry {
    /// Open the registry, loading existing records from the store
    ///
    /// A corrupt on-disk document surfaces as `RegistryCorrupt`; callers
    /// that want to keep running should fall back to [`Self::empty`],
    /// which leaves the broken file in place.
    pub fn open(store: RegistryStore) -> Result<Self> {
        let records = store.load()?;
        Ok(Self { records, store })
    }

    /// An empty registry over the given store, loading nothing
    pub fn empty(store: RegistryStore) -> Self {
        Self {
            records: Vec::new(),
            store,
        }
    }

    /// Register a project directory
    ///
    /// Derives the display name from the final path segment, classifies
    /// the directory, and persists the new snapshot. Registering a path
    /// that is already tracked returns `DuplicateProject` and changes
    /// nothing. If the snapshot write fails the record stays in memory,
    /// so the next successful persist picks it up.
    pub fn add(&mut self, dir: &Path) -> Result<ProjectRecord> {
        let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        let path = dir.to_string_lossy().to_string();

        if self.records.iter().any(|r| r.path == path) {
            return Err(CodetrayError::duplicate(path));
        }

        let name = utils::paths::filename(&dir).unwrap_or_else(|| "Untitled".to_string());
        let info = detector::detect(&dir);

        let record = ProjectRecord {
            name,
            path,
            ecosystem: Some(info.ecosystem),
            framework: info.framework,
            added_at: Utc::now(),
            last_opened: None,
            open_count: 0,
        };

        info!("adding project '{}' ({})", record.name, record.path);
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Remove a project, keyed by its path
    ///
    /// Removal is always keyed by the unique path, never by a position
    /// in some sorted view, so it can't go stale when the presentation
    /// order diverges from storage order.
    pub fn remove(&mut self, path: &str) -> Result<ProjectRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.path == path)
            .ok_or_else(|| CodetrayError::not_found(path))?;

        let record = self.records.remove(index);
        info!("removed project '{}' ({})", record.name, record.path);
        self.persist()?;
        Ok(record)
    }

    /// Bump the usage statistics for a project and persist
    pub fn record_opened(&mut self, path: &str) -> Result<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.path == path)
            .ok_or_else(|| CodetrayError::not_found(path))?;

        record.open_count += 1;
        record.last_opened = Some(Utc::now());
        self.persist()
    }

    /// Look up a record by path
    pub fn find(&self, path: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.path == path)
    }

    /// Iterate the records in the requested order
    ///
    /// The iterator borrows the registry; call again to restart.
    pub fn iter(&self, order: ListOrder) -> Box<dyn Iterator<Item = &ProjectRecord> + '_> {
        match order {
            ListOrder::Insertion => Box::new(self.records.iter()),
            ListOrder::Name => {
                let mut sorted: Vec<&ProjectRecord> = self.records.iter().collect();
                sorted.sort_by_key(|r| r.name.to_lowercase());
                Box::new(sorted.into_iter())
            }
        }
    }

    /// The most opened projects, descending, at most `limit` of them
    ///
    /// Projects that were never opened don't show up at all.
    pub fn most_used(&self, limit: usize) -> Vec<&ProjectRecord> {
        let mut used: Vec<&ProjectRecord> =
            self.records.iter().filter(|r| r.open_count > 0).collect();
        used.sort_by(|a, b| b.open_count.cmp(&a.open_count));
        used.truncate(limit);
        used
    }

    /// Aggregate usage figures for the stats view
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total_projects: self.records.len(),
            ..Default::default()
        };

        for record in &self.records {
            if record.open_count > 0 {
                stats.projects_used += 1;
            }
            stats.total_opens += record.open_count;

            let ecosystem = record.ecosystem.unwrap_or(detector::Ecosystem::Generic);
            let kind = match &record.framework {
                Some(framework) => format!("{} ({})", ecosystem, framework),
                None => ecosystem.to_string(),
            };
            *stats.by_kind.entry(kind).or_insert(0) += 1;
        }

        stats.most_used = self
            .most_used(3)
            .into_iter()
            .map(|r| (r.name.clone(), r.open_count))
            .collect();

        stats
    }

    /// Discard in-memory state and re-read from storage
    ///
    /// Used to pick up manual edits to the registry file. On a corrupt
    /// document the in-memory registry is left empty and the error is
    /// surfaced; the file itself is not touched.
    pub fn reload(&mut self) -> Result<()> {
        match self.store.load() {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(err) => {
                warn!("registry reload failed: {}", err);
                self.records.clear();
                Err(err)
            }
        }
    }

    /// Location of the on-disk registry document
    pub fn file_path(&self) -> &std::path::Path {
        self.store.path()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::Ecosystem;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        registry: ProjectRegistry,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let store = RegistryStore::new(temp.path().join("projects.json"));
        Fixture {
            registry: ProjectRegistry::empty(store),
            _temp: temp,
        }
    }

    fn project_dir(temp: &TempDir, name: &str) -> std::path::PathBuf {
        let dir = temp.path().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_add_then_list_contains_exactly_one() {
        let mut fx = fixture();
        let dir = project_dir(&fx._temp, "alpha");

        let record = fx.registry.add(&dir).unwrap();
        assert_eq!(record.name, "alpha");

        let matching: Vec<_> = fx
            .registry
            .iter(ListOrder::Insertion)
            .filter(|r| r.path == record.path)
            .collect();
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn test_duplicate_add_rejected_without_mutation() {
        let mut fx = fixture();
        let dir = project_dir(&fx._temp, "alpha");

        fx.registry.add(&dir).unwrap();
        let err = fx.registry.add(&dir).unwrap_err();
        assert!(matches!(err, CodetrayError::DuplicateProject { .. }));
        assert_eq!(fx.registry.len(), 1);
    }

    #[test]
    fn test_add_classifies_directory() {
        let mut fx = fixture();
        let dir = project_dir(&fx._temp, "gopher");
        std::fs::write(dir.join("go.mod"), "module m\n").unwrap();

        let record = fx.registry.add(&dir).unwrap();
        assert_eq!(record.ecosystem, Some(Ecosystem::Go));
        assert_eq!(record.framework, None);
        assert_eq!(record.open_count, 0);
        assert_eq!(record.last_opened, None);
    }

    #[test]
    fn test_remove_by_path() {
        let mut fx = fixture();
        let dir = project_dir(&fx._temp, "alpha");
        let record = fx.registry.add(&dir).unwrap();

        let removed = fx.registry.remove(&record.path).unwrap();
        assert_eq!(removed.path, record.path);
        assert!(fx.registry.iter(ListOrder::Insertion).next().is_none());
    }

    #[test]
    fn test_remove_unknown_path_is_a_no_op() {
        let mut fx = fixture();
        let dir = project_dir(&fx._temp, "alpha");
        fx.registry.add(&dir).unwrap();

        let err = fx.registry.remove("/no/such/project").unwrap_err();
        assert!(matches!(err, CodetrayError::ProjectNotFound { .. }));
        assert_eq!(fx.registry.len(), 1);
    }

    #[test]
    fn test_record_opened_increments_by_exactly_n() {
        let mut fx = fixture();
        let dir = project_dir(&fx._temp, "alpha");
        let record = fx.registry.add(&dir).unwrap();

        for _ in 0..5 {
            fx.registry.record_opened(&record.path).unwrap();
        }

        let updated = fx.registry.find(&record.path).unwrap();
        assert_eq!(updated.open_count, 5);
        assert!(updated.last_opened.is_some());
    }

    #[test]
    fn test_record_opened_unknown_path() {
        let mut fx = fixture();
        let err = fx.registry.record_opened("/no/such/project").unwrap_err();
        assert!(matches!(err, CodetrayError::ProjectNotFound { .. }));
    }

    #[test]
    fn test_save_reload_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = RegistryStore::new(temp.path().join("projects.json"));

        let mut registry = ProjectRegistry::empty(store.clone());
        let alpha = registry.add(&project_dir(&temp, "alpha")).unwrap();
        registry.add(&project_dir(&temp, "beta")).unwrap();
        registry.record_opened(&alpha.path).unwrap();

        let reopened = ProjectRegistry::open(store).unwrap();
        assert_eq!(reopened.len(), 2);
        let names: Vec<_> = reopened
            .iter(ListOrder::Insertion)
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(reopened.iter(ListOrder::Insertion).next().unwrap().open_count, 1);
    }

    #[test]
    fn test_iter_by_name_is_case_insensitive() {
        let mut fx = fixture();
        fx.registry.add(&project_dir(&fx._temp, "zeta")).unwrap();
        fx.registry.add(&project_dir(&fx._temp, "Alpha")).unwrap();
        fx.registry.add(&project_dir(&fx._temp, "beta")).unwrap();

        let names: Vec<_> = fx
            .registry
            .iter(ListOrder::Name)
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);

        // Restartable: a second pass sees the same sequence
        let again: Vec<_> = fx
            .registry
            .iter(ListOrder::Name)
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, again);
    }

    #[test]
    fn test_most_used_skips_never_opened() {
        let mut fx = fixture();
        let a = fx.registry.add(&project_dir(&fx._temp, "a")).unwrap();
        let b = fx.registry.add(&project_dir(&fx._temp, "b")).unwrap();
        fx.registry.add(&project_dir(&fx._temp, "c")).unwrap();

        fx.registry.record_opened(&a.path).unwrap();
        fx.registry.record_opened(&b.path).unwrap();
        fx.registry.record_opened(&b.path).unwrap();

        let most_used = fx.registry.most_used(5);
        let names: Vec<_> = most_used.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_stats_aggregates() {
        let mut fx = fixture();
        let go_dir = project_dir(&fx._temp, "gopher");
        std::fs::write(go_dir.join("go.mod"), "module m\n").unwrap();
        let go = fx.registry.add(&go_dir).unwrap();
        fx.registry.add(&project_dir(&fx._temp, "plain")).unwrap();

        fx.registry.record_opened(&go.path).unwrap();
        fx.registry.record_opened(&go.path).unwrap();

        let stats = fx.registry.stats();
        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.projects_used, 1);
        assert_eq!(stats.total_opens, 2);
        assert_eq!(stats.by_kind.get("Go"), Some(&1));
        assert_eq!(stats.by_kind.get("Project"), Some(&1));
        assert_eq!(stats.most_used, vec![("gopher".to_string(), 2)]);
    }

    #[test]
    fn test_reload_picks_up_external_edits() {
        let temp = TempDir::new().unwrap();
        let store = RegistryStore::new(temp.path().join("projects.json"));
        let mut registry = ProjectRegistry::empty(store);
        registry.add(&project_dir(&temp, "alpha")).unwrap();

        // Simulate a hand edit that renames the entry
        let file = temp.path().join("projects.json");
        let edited = std::fs::read_to_string(&file)
            .unwrap()
            .replace("\"alpha\"", "\"renamed\"");
        std::fs::write(&file, edited).unwrap();

        registry.reload().unwrap();
        assert_eq!(
            registry.iter(ListOrder::Insertion).next().unwrap().name,
            "renamed"
        );
    }

    #[test]
    fn test_reload_on_corrupt_file_empties_memory() {
        let temp = TempDir::new().unwrap();
        let store = RegistryStore::new(temp.path().join("projects.json"));
        let mut registry = ProjectRegistry::empty(store);
        registry.add(&project_dir(&temp, "alpha")).unwrap();

        std::fs::write(temp.path().join("projects.json"), "{{{").unwrap();

        let err = registry.reload().unwrap_err();
        assert!(matches!(err, CodetrayError::RegistryCorrupt { .. }));
        assert!(registry.is_empty());
    }
}
