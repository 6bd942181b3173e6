//! Habit collection persistence.
//!
//! The persistence service is an opaque key/value blob store ([`BlobStore`]);
//! the whole application state is one JSON blob -- the serialized `Vec<Habit>`
//! -- under a single fixed key. Load is defensive: a missing or corrupt blob
//! is an empty collection, never an error, and every record is passed through
//! the normalization boundary so older partial records pick up defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::StoreError;
use crate::habit::Habit;

/// Storage key for the habit collection blob.
pub const HABITS_KEY: &str = "habits_v3";

/// Opaque key/value blob persistence, the shape of the external service.
pub trait BlobStore: Send + Sync {
    /// Fetch a blob, `None` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a blob wholesale. Last write wins.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Returns `~/.config/habitkit[-dev]/` based on HABITKIT_ENV.
///
/// Set HABITKIT_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITKIT_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base_dir.join("habitkit-dev")
    } else {
        base_dir.join("habitkit")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// File-backed blob store: one `<key>.json` file per key.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store at the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Open the store at an explicit directory (tests point this at a
    /// temporary directory).
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| StoreError::Write { path, source: e })
    }
}

/// In-memory blob store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Gateway between the habit collection and the blob store.
pub struct HabitStore<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> HabitStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the full collection. Missing or corrupt data yields an empty
    /// collection; every record is normalized so partial records written by
    /// older versions come back with defaults filled in.
    pub fn load(&self) -> Vec<Habit> {
        let blob = match self.store.get(HABITS_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read habit blob, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Habit>>(&blob) {
            Ok(habits) => habits.into_iter().map(Habit::normalized).collect(),
            Err(e) => {
                warn!(error = %e, "corrupt habit blob, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the full collection as one blob. Last write wins; no version
    /// check.
    pub fn save(&self, habits: &[Habit]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(habits)?;
        self.store.set(HABITS_KEY, &blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::Frequency;

    #[test]
    fn missing_blob_loads_as_empty_collection() {
        let store = HabitStore::new(MemoryStore::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_blob_loads_as_empty_collection() {
        let inner = MemoryStore::new();
        inner.set(HABITS_KEY, "{not json").unwrap();
        let store = HabitStore::new(inner);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let store = HabitStore::new(MemoryStore::new());
        let habits = vec![
            Habit::new("Meditate", "🧘", "#7c4dff", "Health", Frequency::Daily, vec![]),
            Habit::new("Gym", "🏋", "#ff5722", "Fitness", Frequency::Custom, vec![1, 3, 5]),
        ];
        store.save(&habits).unwrap();
        assert_eq!(store.load(), habits);
    }

    #[test]
    fn load_fills_defaults_for_partial_records() {
        let inner = MemoryStore::new();
        inner
            .set(HABITS_KEY, r#"[{"id":"h1","title":"Read"}]"#)
            .unwrap();
        let store = HabitStore::new(inner);

        let habits = store.load();
        assert_eq!(habits.len(), 1);
        let h = &habits[0];
        assert_eq!(h.frequency, Frequency::Daily);
        assert!(h.completed_dates.is_empty());
        assert!(h.notification_ids.is_empty());
        assert_eq!(h.xp, 0);
    }

    #[test]
    fn load_normalizes_malformed_entries() {
        let inner = MemoryStore::new();
        inner
            .set(
                HABITS_KEY,
                r#"[{"id":"h1","title":" Read ","completed_dates":["2026-03-01","2026-03-01","junk"],"weekdays":[9,2]}]"#,
            )
            .unwrap();
        let store = HabitStore::new(inner);

        let habits = store.load();
        assert_eq!(habits[0].title, "Read");
        assert_eq!(habits[0].completed_dates, vec!["2026-03-01".to_string()]);
        assert_eq!(habits[0].weekdays, vec![2]);
    }
}
