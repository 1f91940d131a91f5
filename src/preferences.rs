//! Persistent key-value preferences
//!
//! The grid only stores one thing here: the column visibility map, as a JSON
//! object under [`COLUMN_VISIBILITY_KEY`]. Storage is last-write-wins with no
//! transactional guarantees.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::model::view_state::ColumnVisibility;

/// Key holding the column visibility map
pub const COLUMN_VISIBILITY_KEY: &str = "DataGridProColumnVisibility";

/// Opaque key-value store for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store, for tests and embedders without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// JSON file store (`~/.config/datagrid/preferences.json` by default)
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Load preferences from a file. A missing or unreadable file starts empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed preferences at {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    /// Load from the default location, if a config directory exists
    pub fn load_default() -> Option<Self> {
        crate::config_paths::preferences_file().map(Self::load)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, contents)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            tracing::warn!("Failed to write preferences to {}: {}", self.path.display(), e);
        }
    }
}

/// Read the stored column visibility map. Malformed values read as empty.
pub fn load_column_visibility(store: &dyn PreferenceStore) -> ColumnVisibility {
    let Some(raw) = store.get(COLUMN_VISIBILITY_KEY) else {
        return ColumnVisibility::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed column visibility preference: {}", e);
        ColumnVisibility::new()
    })
}

pub fn save_column_visibility(store: &mut dyn PreferenceStore, visibility: &ColumnVisibility) {
    match serde_json::to_string(visibility) {
        Ok(json) => store.set(COLUMN_VISIBILITY_KEY, json),
        Err(e) => tracing::warn!("Failed to serialize column visibility: {}", e),
    }
}
