//! Preference store backed by a JSON file.

use kinarow::{PreferenceStore, StoreError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// A JSON object of key -> string value kept in a single file.
///
/// Every `set` rewrites the whole file. A missing or unreadable file opens
/// as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!(error = %e, "Store file is not a JSON object of strings, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file does not exist yet");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read store file, starting empty");
                BTreeMap::new()
            }
        };
        info!(keys = values.len(), "Store opened");
        Self { path, values }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str) -> Result<(), StoreError> {
        let content =
            serde_json::to_string_pretty(&self.values).map_err(|e| StoreError::encode(key, e))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::write(key, format!("{}: {}", self.path.display(), e)))
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush(key)?;
        debug!(key, "Store flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinarow::StoreFailure;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::open(dir.path().join("prefs.json"));
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.json");

        let mut store = JsonFileStore::open(&path);
        store.set("a", "1".to_string()).expect("write");
        store.set("b", "two".to_string()).expect("write");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("a").as_deref(), Some("1"));
        assert_eq!(reopened.get("b").as_deref(), Some("two"));
    }

    #[test]
    fn test_garbage_file_opens_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json at all").expect("write");
        assert_eq!(JsonFileStore::open(&path).get("a"), None);
    }

    #[test]
    fn test_unwritable_path_reports_error() {
        let dir = TempDir::new().expect("temp dir");
        let mut store = JsonFileStore::open(dir.path().join("missing").join("prefs.json"));
        let err = store.set("a", "1".to_string()).expect_err("parent dir missing");
        assert_eq!(err.key, "a");
        assert!(matches!(err.failure, StoreFailure::Write(_)));
        // The in-memory value is still visible.
        assert_eq!(store.get("a").as_deref(), Some("1"));
    }
}
