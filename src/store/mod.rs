//! Named-configuration storage: whole-record CRUD over `{id, name, config}`.
//!
//! The compiler and filter engine never touch this layer; the surrounding
//! application loads a pipeline, runs the core, and writes results back.

pub mod file;
pub mod memory;

use crate::model::Pipeline;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One persisted configuration. `config` is stored as the whole pipeline
/// blob; a save captures the entire aggregate or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub id: i64,
    pub name: String,
    pub config: Pipeline,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub config: Option<Pipeline>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("configuration not found: {id}")]
    NotFound { id: i64 },
    #[error("storage I/O failed")]
    Io(#[from] std::io::Error),
    #[error("stored data is corrupt")]
    Corrupt(#[from] serde_json::Error),
}

pub trait ConfigStore {
    fn list(&self) -> Result<Vec<ConfigRecord>, StoreError>;
    fn get(&self, id: i64) -> Result<ConfigRecord, StoreError>;
    fn create(&mut self, name: &str, config: Pipeline) -> Result<ConfigRecord, StoreError>;
    fn update(&mut self, id: i64, update: RecordUpdate) -> Result<ConfigRecord, StoreError>;
    fn delete(&mut self, id: i64) -> Result<(), StoreError>;
}

pub use file::FileStore;
pub use memory::MemoryStore;
