//! Budget ledger repository
//!
//! Loads and saves every month's budget as a single `budgetData` record.

use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::TrackerError;
use crate::models::{BudgetLedger, MonthKey, MonthlyBudget};

use super::store::{load_record, save_record, Store, BUDGET_KEY};

/// Repository for budget ledger persistence
pub struct BudgetRepository {
    store: Arc<dyn Store>,
    ledger: RwLock<BudgetLedger>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            ledger: RwLock::new(BudgetLedger::new()),
        }
    }

    /// Load the ledger; a missing record is an empty ledger
    pub fn load(&self) -> Result<(), TrackerError> {
        let loaded: Option<BudgetLedger> = load_record(self.store.as_ref(), BUDGET_KEY)?;

        let mut ledger = self
            .ledger
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *ledger = loaded.unwrap_or_default();
        Ok(())
    }

    /// Write the cached budget ledger to the store
    ///
    /// If the write fails the cache is reloaded, so it matches what the
    /// store last accepted.
    pub fn save(&self) -> Result<(), TrackerError> {
        let written = {
            let ledger = self
                .ledger
                .read()
                .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
            save_record(self.store.as_ref(), BUDGET_KEY, &*ledger)
        };

        if let Err(err) = written {
            warn!(key = BUDGET_KEY, error = %err, "save failed, reloading cached record");
            if let Err(reload) = self.load() {
                warn!(key = BUDGET_KEY, error = %reload, "reload after failed save failed");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Snapshot of the whole ledger
    pub fn get_all(&self) -> Result<BudgetLedger, TrackerError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ledger.clone())
    }

    /// The budget for one month (empty if none is stored)
    pub fn get_month(&self, month: &MonthKey) -> Result<MonthlyBudget, TrackerError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(ledger.monthly_budget(month))
    }

    /// Apply a change to the in-memory ledger
    ///
    /// Call `save` afterwards to persist it.
    pub fn modify<R>(&self, f: impl FnOnce(&mut BudgetLedger) -> R) -> Result<R, TrackerError> {
        let mut ledger = self
            .ledger
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(f(&mut *ledger))
    }

    /// Number of months with a stored budget
    pub fn count(&self) -> Result<usize, TrackerError> {
        let ledger = self
            .ledger
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(ledger.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    fn jan() -> MonthKey {
        "2024-00".parse().unwrap()
    }

    #[test]
    fn test_empty_load() {
        let repo = BudgetRepository::new(Arc::new(MemoryStore::new()));
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_month(&jan()).unwrap().is_empty());
    }

    #[test]
    fn test_modify_and_get() {
        let repo = BudgetRepository::new(Arc::new(MemoryStore::new()));
        repo.load().unwrap();

        repo.modify(|l| l.set_category_budget(jan(), "Food", 50.0)).unwrap();

        assert_eq!(repo.get_month(&jan()).unwrap().get("Food"), Some(50.0));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let store: Arc<dyn Store> = Arc::new(JsonFileStore::new(temp_dir.path()));

        let repo = BudgetRepository::new(store.clone());
        repo.load().unwrap();
        repo.modify(|l| l.distribute_equally(jan(), 100.0, &["Food", "Transport"]))
            .unwrap();
        repo.save().unwrap();

        assert!(temp_dir.path().join("budgetData.json").exists());

        let repo2 = BudgetRepository::new(store);
        repo2.load().unwrap();
        assert_eq!(repo2.get_all().unwrap(), repo.get_all().unwrap());
    }
}
