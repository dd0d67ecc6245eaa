//! Key-value persistence port
//!
//! Every persisted record is a whole JSON value stored under a name. The
//! [`Store`] trait is the only thing the repositories know about persistence,
//! so the same domain code runs against files on disk or an in-memory map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{TrackerError, TrackerResult};

use super::file_io::{read_json, write_json_atomic};

/// Record holding the ordered category list
pub const CATEGORIES_KEY: &str = "categories";

/// Record holding the budget ledger (month -> category -> amount)
pub const BUDGET_KEY: &str = "budgetData";

/// Record holding the expense list
pub const EXPENSES_KEY: &str = "expenses";

/// Whole-record key-value storage with last-write-wins semantics
pub trait Store: Send + Sync {
    /// Load the record stored under `key`, or `None` if there is none
    fn load(&self, key: &str) -> TrackerResult<Option<Value>>;

    /// Replace the record stored under `key`
    fn save(&self, key: &str, value: &Value) -> TrackerResult<()>;
}

/// Load and deserialize a record
pub fn load_record<T: DeserializeOwned>(store: &dyn Store, key: &str) -> TrackerResult<Option<T>> {
    match store.load(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| TrackerError::Storage(format!("Failed to decode '{}': {}", key, e))),
        None => Ok(None),
    }
}

/// Serialize and save a record
pub fn save_record<T: Serialize + ?Sized>(
    store: &dyn Store,
    key: &str,
    record: &T,
) -> TrackerResult<()> {
    let value = serde_json::to_value(record)
        .map_err(|e| TrackerError::Storage(format!("Failed to encode '{}': {}", key, e)))?;
    store.save(key, &value)
}

/// Stores each record as `<key>.json` inside a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for JsonFileStore {
    fn load(&self, key: &str) -> TrackerResult<Option<Value>> {
        let path = self.path_for(key);
        tracing::debug!(key, path = %path.display(), "loading record");
        read_json(path)
    }

    fn save(&self, key: &str, value: &Value) -> TrackerResult<()> {
        let path = self.path_for(key);
        tracing::debug!(key, path = %path.display(), "saving record");
        write_json_atomic(path, value)
    }
}

/// Keeps records in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a record, e.g. to simulate existing data
    pub fn with_record(self, key: &str, value: Value) -> Self {
        if let Ok(mut records) = self.records.write() {
            records.insert(key.to_string(), value);
        }
        self
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> TrackerResult<Option<Value>> {
        let records = self
            .records
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> TrackerResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        records.insert(key.to_string(), value.clone());
        Ok(())
    }
}
