//! Preference store interface and config persistence helpers.
//!
//! The store is an external collaborator: a string key/value map that may
//! fail or forget. Nothing here assumes durability.

use crate::{GameConfig, RawConfig};
use derive_more::{Display, Error};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Key under which the game config is stored.
pub const PREFS_KEY: &str = "ttt_prefs";

/// Key under which the score tallies are stored.
pub const SCORES_KEY: &str = "ttt_scores";

/// Why a value could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreFailure {
    /// The value could not be serialized.
    #[display("could not encode value: {}", _0)]
    Encode(String),
    /// The backing medium refused the write.
    #[display("could not write: {}", _0)]
    Write(String),
}

/// A failed write to a [`PreferenceStore`], naming the key involved.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Failed to store '{}': {}", key, failure)]
pub struct StoreError {
    /// Key whose value was being stored.
    pub key: String,
    /// What went wrong.
    pub failure: StoreFailure,
}

impl StoreError {
    /// The value for `key` could not be serialized.
    pub fn encode(key: &str, reason: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            failure: StoreFailure::Encode(reason.to_string()),
        }
    }

    /// The value for `key` could not be written.
    pub fn write(key: &str, reason: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            failure: StoreFailure::Write(reason.to_string()),
        }
    }
}

/// A string key/value store for preferences and scores.
pub trait PreferenceStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value could not be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Loads the stored game config, sanitizing whatever is found.
///
/// A missing key or unparseable JSON yields [`GameConfig::default`].
#[instrument(skip(store))]
pub fn load_config(store: &impl PreferenceStore) -> GameConfig {
    let Some(json) = store.get(PREFS_KEY) else {
        debug!("No stored config, using defaults");
        return GameConfig::default();
    };

    match serde_json::from_str::<RawConfig>(&json) {
        Ok(raw) => GameConfig::sanitize(&raw),
        Err(e) => {
            warn!(error = %e, "Stored config unreadable, using defaults");
            GameConfig::default()
        }
    }
}

/// Persists `config`. Failures are logged and swallowed.
#[instrument(skip(store))]
pub fn save_config(store: &mut impl PreferenceStore, config: &GameConfig) {
    let result = serde_json::to_string(config)
        .map_err(|e| StoreError::encode(PREFS_KEY, e))
        .and_then(|json| store.set(PREFS_KEY, json));

    if let Err(e) = result {
        warn!(error = %e, "Failed to persist config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;

    /// Store that refuses every write.
    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::write(key, "read-only"))
        }
    }

    #[test]
    fn test_missing_config_uses_default() {
        assert_eq!(load_config(&MemoryStore::new()), GameConfig::default());
    }

    #[test]
    fn test_config_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let config = GameConfig::validate(8, 5, "@", "#").expect("valid");
        save_config(&mut store, &config);
        assert_eq!(load_config(&store), config);
    }

    #[test]
    fn test_corrupt_config_uses_default() {
        let mut store = MemoryStore::new();
        store.set(PREFS_KEY, "[1,2".to_string()).expect("memory store");
        assert_eq!(load_config(&store), GameConfig::default());
    }

    #[test]
    fn test_stored_config_is_sanitized() {
        let mut store = MemoryStore::new();
        store
            .set(
                PREFS_KEY,
                r#"{"n": 12, "k": 11, "player1Symbol": "Q", "player2Symbol": "Q"}"#.to_string(),
            )
            .expect("memory store");
        let config = load_config(&store);
        assert_eq!(config.size(), 10);
        assert_eq!(config.win_length(), 10);
        assert_eq!(config.player1_symbol(), Symbol::from('Q'));
        assert_eq!(config.player2_symbol(), Symbol::X);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut store = ReadOnlyStore;
        save_config(&mut store, &GameConfig::default());
        assert_eq!(load_config(&store), GameConfig::default());
    }

    #[test]
    fn test_error_names_key_and_failure() {
        let err = StoreError::write(PREFS_KEY, "disk full");
        assert_eq!(err.failure, StoreFailure::Write("disk full".to_string()));
        assert_eq!(err.to_string(), "Failed to store 'ttt_prefs': could not write: disk full");

        let err = StoreError::encode(SCORES_KEY, "bad value");
        assert!(matches!(err.failure, StoreFailure::Encode(_)));
        assert!(err.to_string().starts_with("Failed to store 'ttt_scores'"));
    }
}
