//! File-backed store: one JSON document holding every record.
//!
//! Saves are atomic replace-or-fail: the document is written to a temp file
//! in the same directory, then renamed over the target. A failed save leaves
//! the previous on-disk state untouched.

use crate::model::Pipeline;
use crate::store::{ConfigRecord, ConfigStore, RecordUpdate, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    next_id: i64,
    records: Vec<ConfigRecord>,
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    records: BTreeMap<i64, ConfigRecord>,
    next_id: i64,
}

impl FileStore {
    /// Open a store document, creating an empty one in memory when the file
    /// does not exist yet (it is written on first mutation).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Ok(Self {
                path,
                records: BTreeMap::new(),
                next_id: 1,
            });
        }

        let text = fs::read_to_string(&path)?;
        let doc: StoreDocument = serde_json::from_str(&text)?;
        Ok(Self {
            path,
            records: doc.records.into_iter().map(|r| (r.id, r)).collect(),
            next_id: doc.next_id,
        })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let doc = StoreDocument {
            next_id: self.next_id,
            records: self.records.values().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&doc)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn list(&self) -> Result<Vec<ConfigRecord>, StoreError> {
        Ok(self.records.values().cloned().collect())
    }

    fn get(&self, id: i64) -> Result<ConfigRecord, StoreError> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn create(&mut self, name: &str, config: Pipeline) -> Result<ConfigRecord, StoreError> {
        let id = self.next_id;
        let record = ConfigRecord {
            id,
            name: name.to_string(),
            config,
        };

        self.records.insert(id, record.clone());
        self.next_id += 1;
        if let Err(err) = self.persist() {
            // Roll back so memory matches the unchanged file.
            self.records.remove(&id);
            self.next_id = id;
            return Err(err);
        }
        Ok(record)
    }

    fn update(&mut self, id: i64, update: RecordUpdate) -> Result<ConfigRecord, StoreError> {
        let previous = self
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })?;

        let record = self.records.get_mut(&id).expect("checked above");
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(config) = update.config {
            record.config = config;
        }
        let updated = record.clone();

        if let Err(err) = self.persist() {
            self.records.insert(id, previous);
            return Err(err);
        }
        Ok(updated)
    }

    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let previous = self
            .records
            .remove(&id)
            .ok_or(StoreError::NotFound { id })?;

        if let Err(err) = self.persist() {
            self.records.insert(id, previous);
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::example_pipeline;

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs.json");

        let mut store = FileStore::open(&path).unwrap();
        let record = store.create("demo", example_pipeline()).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(record.id).unwrap(), record);
        // Ids keep incrementing across sessions.
        let mut reopened = reopened;
        let second = reopened.create("other", example_pipeline()).unwrap();
        assert_eq!(second.id, record.id + 1);
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("none.json")).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("s.json")).unwrap();
        assert!(matches!(
            store.delete(7),
            Err(StoreError::NotFound { id: 7 })
        ));
    }

    #[test]
    fn no_temp_file_left_behind_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configs.json");
        let mut store = FileStore::open(&path).unwrap();
        store.create("demo", example_pipeline()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
