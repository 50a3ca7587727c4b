//! Settings store
//!
//! A small persisted key/value configuration, independent of the
//! project registry. Loaded once at startup; every `set` rewrites the
//! whole document. The file is plain JSON but parsing strips `//`
//! comments so hand-edited files keep working.

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::{CodetrayError, Result};
use crate::utils;

const SETTINGS_FILE: &str = "settings.json";

/// Key for the launch-at-login flag
///
/// The OS startup-item registration itself happens in the tray shell;
/// this store only persists the flag it reads.
pub const AUTO_START_ENABLED: &str = "autoStartEnabled";

/// Persisted application settings
pub struct SettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl SettingsStore {
    /// Load settings from the platform application-data location
    pub fn load_default() -> Result<Self> {
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
        Self::load(config_dir.join(SETTINGS_FILE))
    }

    /// Load settings from a specific file
    ///
    /// If the file doesn't exist yet, the defaults are written to disk.
    /// A file that exists but doesn't parse falls back to defaults in
    /// memory and is left on disk for inspection.
    pub fn load(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            let store = Self {
                path,
                values: defaults(),
            };
            store.persist()?;
            info!("created default settings at {:?}", store.path);
            return Ok(store);
        }

        let content = fs::read_to_string(&path)?;
        let values = match parse_jsonc(&content) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                warn!("settings file {:?} is not an object ({})", path, other);
                defaults()
            }
            Err(err) => {
                warn!("settings file {:?} is unparsable: {}", path, err);
                defaults()
            }
        };

        let mut store = Self { path, values };
        // Known keys that older documents are missing default in memory
        store
            .values
            .entry(AUTO_START_ENABLED.to_string())
            .or_insert(Value::Bool(false));
        Ok(store)
    }

    /// Read a setting value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The launch-at-login flag
    pub fn auto_start_enabled(&self) -> bool {
        self.values
            .get(AUTO_START_ENABLED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Set a value and persist immediately
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        self.values.insert(key.into(), value);
        self.persist()
    }

    /// All settings, for display
    pub fn all(&self) -> &Map<String, Value> {
        &self.values
    }

    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&Value::Object(self.values.clone()))?;
        utils::fs::write_atomic(&self.path, &content).map_err(|source| {
            CodetrayError::persistence("settings", self.path.display().to_string(), source)
        })
    }
}

fn defaults() -> Map<String, Value> {
    let mut values = Map::new();
    values.insert(AUTO_START_ENABLED.to_string(), Value::Bool(false));
    values
}

/// Parse a JSONC string (JSON with comments) into a Value
fn parse_jsonc(content: &str) -> serde_json::Result<Value> {
    let stripped = json_comments::StripComments::new(content.as_bytes());
    serde_json::from_reader(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        let store = SettingsStore::load(path.clone()).unwrap();
        assert!(!store.auto_start_enabled());

        // The defaults document now exists on disk
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("autoStartEnabled"));
    }

    #[test]
    fn test_set_persists_immediately() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        let mut store = SettingsStore::load(path.clone()).unwrap();
        store.set(AUTO_START_ENABLED, Value::Bool(true)).unwrap();

        let reloaded = SettingsStore::load(path).unwrap();
        assert!(reloaded.auto_start_enabled());
    }

    #[test]
    fn test_unknown_keys_survive_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{ "autoStartEnabled": true, "theme": "dark" }"#).unwrap();

        let mut store = SettingsStore::load(path.clone()).unwrap();
        store.set("other", Value::from(1)).unwrap();

        let reloaded = SettingsStore::load(path).unwrap();
        assert_eq!(reloaded.get("theme"), Some(&Value::from("dark")));
        assert!(reloaded.auto_start_enabled());
    }

    #[test]
    fn test_comments_in_settings_are_tolerated() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(
            &path,
            "{\n  // start with the session\n  \"autoStartEnabled\": true\n}",
        )
        .unwrap();

        let store = SettingsStore::load(path).unwrap();
        assert!(store.auto_start_enabled());
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, "{{ nope").unwrap();

        let store = SettingsStore::load(path.clone()).unwrap();
        assert!(!store.auto_start_enabled());

        // Broken file left in place until the next explicit write
        assert_eq!(fs::read_to_string(&path).unwrap(), "{{ nope");
    }

    #[test]
    fn test_missing_known_key_defaults_in_memory_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let store = SettingsStore::load(path.clone()).unwrap();
        assert!(!store.auto_start_enabled());

        // The document is not rewritten just for a missing default
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{ "theme": "dark" }"#
        );
    }
}
