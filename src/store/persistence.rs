use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::GroceryError;

/// Named snapshots written after every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    AllLists,
    CurrentList,
}

impl SnapshotKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKey::AllLists => "all_lists",
            SnapshotKey::CurrentList => "current_list",
        }
    }
}

/// Key-value blob store holding serialized snapshots
///
/// The list store owns encoding; implementations only move bytes.
pub trait SnapshotStore: Send + Sync {
    /// Backend name for log lines (e.g. "memory", "json")
    fn backend_name(&self) -> &str;

    /// `Ok(None)` when nothing has been saved under `key` yet
    fn load(&self, key: SnapshotKey) -> Result<Option<Vec<u8>>, GroceryError>;

    fn save(&mut self, key: SnapshotKey, data: &[u8]) -> Result<(), GroceryError>;
}

/// In-process store; clones share the same snapshots
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshots: Arc<Mutex<HashMap<SnapshotKey, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of whatever was last saved under `key`
    pub fn snapshot(&self, key: SnapshotKey) -> Option<Vec<u8>> {
        self.snapshots
            .lock()
            .ok()
            .and_then(|snapshots| snapshots.get(&key).cloned())
    }

    /// Seed a snapshot, e.g. to simulate a previous session
    pub fn insert(&self, key: SnapshotKey, data: impl Into<Vec<u8>>) {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.insert(key, data.into());
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    fn load(&self, key: SnapshotKey) -> Result<Option<Vec<u8>>, GroceryError> {
        Ok(self.snapshot(key))
    }

    fn save(&mut self, key: SnapshotKey, data: &[u8]) -> Result<(), GroceryError> {
        self.insert(key, data);
        Ok(())
    }
}

/// One `<key>.json` file per snapshot inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: SnapshotKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl SnapshotStore for JsonFileStore {
    fn backend_name(&self) -> &str {
        "json"
    }

    fn load(&self, key: SnapshotKey) -> Result<Option<Vec<u8>>, GroceryError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        debug!("Reading snapshot {}", path.display());
        Ok(Some(fs::read(path)?))
    }

    fn save(&mut self, key: SnapshotKey, data: &[u8]) -> Result<(), GroceryError> {
        fs::create_dir_all(&self.dir)?;

        // Readers only ever see a complete snapshot
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        debug!("Wrote snapshot {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_key_names() {
        assert_eq!(SnapshotKey::AllLists.as_str(), "all_lists");
        assert_eq!(SnapshotKey::CurrentList.as_str(), "current_list");
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let mut handle = store.clone();

        assert!(store.load(SnapshotKey::AllLists).unwrap().is_none());
        handle.save(SnapshotKey::AllLists, b"[]").unwrap();
        assert_eq!(store.snapshot(SnapshotKey::AllLists).unwrap(), b"[]");
        assert!(store.snapshot(SnapshotKey::CurrentList).is_none());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested"));

        assert!(store.load(SnapshotKey::CurrentList).unwrap().is_none());
        store.save(SnapshotKey::CurrentList, b"{\"a\":1}").unwrap();

        assert!(dir.path().join("nested/current_list.json").exists());
        assert_eq!(
            store.load(SnapshotKey::CurrentList).unwrap().unwrap(),
            b"{\"a\":1}"
        );
    }
}
