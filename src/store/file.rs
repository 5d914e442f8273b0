// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file store for the local binary.
//!
//! The whole map lives in memory and is written back to a single JSON
//! object on every mutation (temp file + rename). Reads never touch disk
//! after open.

use crate::store::{KeyValueStore, StoreError};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, String>,
    /// Serializes writers so the file always reflects one consistent map.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A file that exists but is not a JSON object of strings is an error;
    /// the caller decides whether to start over.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = DashMap::new();

        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
            if !raw.trim().is_empty() {
                let map: BTreeMap<String, String> =
                    serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                        key: path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                for (key, value) in map {
                    entries.insert(key, value);
                }
            }
        }

        tracing::info!(path = %path.display(), entries = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `snapshot` to disk. Callers hold `write_lock`.
    fn write_snapshot(&self, snapshot: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json =
            serde_json::to_string_pretty(snapshot).map_err(|e| StoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    /// Persist the map with `key` set to `value` (or removed when `None`),
    /// then commit the change in memory. A failed write leaves the map
    /// untouched.
    fn update(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Io("store write lock poisoned".to_string()))?;

        let mut snapshot: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        match value {
            Some(value) => snapshot.insert(key.to_string(), value.to_string()),
            None => snapshot.remove(key),
        };
        self.write_snapshot(&snapshot)?;

        match value {
            Some(value) => {
                self.entries.insert(key.to_string(), value.to_string());
            }
            None => {
                self.entries.remove(key);
            }
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(key, Some(value))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        self.update(key, None)
    }
}
