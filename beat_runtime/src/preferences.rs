//! Persisted preference storage.
//!
//! One key matters to the engine: `hand`. Reads and writes are best
//! effort; failures are logged and never block a state transition.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use beat_engine::Hand;

use crate::error::RuntimeError;

/// Preference key holding the active hand.
pub const HAND_KEY: &str = "hand";

/// String key-value store for user preferences.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, RuntimeError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), RuntimeError>;
}

/// In-memory store, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut prefs = Self::new();
        prefs.values.insert(key.to_string(), value.to_string());
        prefs
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, RuntimeError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RuntimeError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk: `{"hand": "left"}`.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, RuntimeError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| RuntimeError::PreferenceIo {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| RuntimeError::PreferenceFormat {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, RuntimeError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RuntimeError> {
        // A corrupt file is replaced rather than preserved.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        let io_err = |source| RuntimeError::PreferenceIo {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&values).map_err(|source| {
            RuntimeError::PreferenceFormat {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(io_err)
    }
}

/// Stored hand, or the default when missing, invalid or unreadable.
pub fn load_hand(store: &dyn PreferenceStore) -> Hand {
    match store.get(HAND_KEY) {
        Ok(Some(raw)) => Hand::parse(&raw).unwrap_or_else(|| {
            warn!(value = %raw, "ignoring unrecognised hand preference");
            Hand::default()
        }),
        Ok(None) => Hand::default(),
        Err(e) => {
            warn!(error = %e, "hand preference unavailable, using default");
            Hand::default()
        }
    }
}

/// Persist the hand. Failure is logged and swallowed.
pub fn save_hand(store: &mut dyn PreferenceStore, hand: Hand) {
    if let Err(e) = store.set(HAND_KEY, hand.as_str()) {
        warn!(error = %e, hand = hand.as_str(), "failed to persist hand preference");
    }
}
