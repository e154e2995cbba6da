//! In-memory store with auto-increment ids; the editor's default backend.

use crate::model::{Pipeline, example_pipeline};
use crate::store::{ConfigRecord, ConfigStore, RecordUpdate, StoreError};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct MemoryStore {
    records: BTreeMap<i64, ConfigRecord>,
    next_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Store seeded with the cpu/mem demo pipeline, matching what a fresh
    /// editor session shows.
    pub fn with_example() -> Self {
        let mut store = Self::new();
        let example = example_pipeline();
        let name = example.name.clone();
        store
            .create(&name, example)
            .expect("seeding an empty store cannot fail");
        store
    }
}

impl ConfigStore for MemoryStore {
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
        self.next_id += 1;
        let record = ConfigRecord {
            id,
            name: name.to_string(),
            config,
        };
        self.records.insert(id, record.clone());
        Ok(record)
    }

    fn update(&mut self, id: i64, update: RecordUpdate) -> Result<ConfigRecord, StoreError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(StoreError::NotFound { id })?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(config) = update.config {
            record.config = config;
        }
        Ok(record.clone())
    }

    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }
}
