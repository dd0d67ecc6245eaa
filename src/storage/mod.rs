//! Storage layer for Pennywise
//!
//! Every record is read and written whole through the [`Store`] port. The
//! repositories cache the decoded records and write them back on `save`.

pub mod budget;
pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod store;

pub use budget::BudgetRepository;
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use store::{JsonFileStore, MemoryStore, Store};

use std::sync::Arc;

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: Option<TrackerPaths>,
    pub categories: CategoryRepository,
    pub budget: BudgetRepository,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create file-backed storage under the configured data directory
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        let store = Arc::new(JsonFileStore::new(paths.data_dir()));
        let mut storage = Self::with_store(store);
        storage.paths = Some(paths);
        Ok(storage)
    }

    /// Create storage on top of any store implementation
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            paths: None,
            categories: CategoryRepository::new(store.clone()),
            budget: BudgetRepository::new(store.clone()),
            expenses: ExpenseRepository::new(store),
        }
    }

    /// Create empty, loaded, in-memory storage
    pub fn in_memory() -> Result<Self, TrackerError> {
        let storage = Self::with_store(Arc::new(MemoryStore::new()));
        storage.load_all()?;
        Ok(storage)
    }

    /// Paths in use, if this storage is file-backed
    pub fn paths(&self) -> Option<&TrackerPaths> {
        self.paths.as_ref()
    }

    /// Load all records
    pub fn load_all(&self) -> Result<(), TrackerError> {
        self.categories.load()?;
        self.budget.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all records
    pub fn save_all(&self) -> Result<(), TrackerError> {
        self.categories.save()?;
        self.budget.save()?;
        self.expenses.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerResult;
    use crate::models::{CategoryRegistry, MonthKey};
    use serde_json::Value;
    use tempfile::TempDir;

    /// Serves reads from memory and rejects every write
    struct ReadOnlyStore(MemoryStore);

    impl Store for ReadOnlyStore {
        fn load(&self, key: &str) -> TrackerResult<Option<Value>> {
            self.0.load(key)
        }

        fn save(&self, key: &str, _value: &Value) -> TrackerResult<()> {
            Err(TrackerError::Storage(format!("{} is read-only", key)))
        }
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.paths().is_some());
    }

    #[test]
    fn test_save_all_writes_every_record() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        storage.save_all().unwrap();

        let data = paths.data_dir();
        assert!(data.join("categories.json").exists());
        assert!(data.join("budgetData.json").exists());
        assert!(data.join("expenses.json").exists());
    }

    #[test]
    fn test_in_memory_starts_with_defaults() {
        let storage = Storage::in_memory().unwrap();
        assert!(storage.paths().is_none());
        assert_eq!(storage.categories.get().unwrap(), CategoryRegistry::default());
        assert_eq!(storage.budget.count().unwrap(), 0);
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_failed_save_restores_cache() {
        let storage = Storage::with_store(Arc::new(ReadOnlyStore(MemoryStore::new())));
        storage.load_all().unwrap();
        let jan: MonthKey = "2024-00".parse().unwrap();

        storage.categories.modify(|r| r.add("Pets")).unwrap();
        assert!(storage.categories.save().is_err());
        assert_eq!(storage.categories.get().unwrap(), CategoryRegistry::default());

        storage
            .budget
            .modify(|l| l.set_category_budget(jan, "Food", 50.0))
            .unwrap();
        assert!(storage.budget.save().is_err());
        assert_eq!(storage.budget.count().unwrap(), 0);
    }
}
