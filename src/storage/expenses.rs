//! Expense repository
//!
//! Manages loading and saving the expense list under the `expenses` record.
//! Insertion order is preserved in storage.

use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::TrackerError;
use crate::models::{Expense, ExpenseId, MonthKey};

use super::store::{load_record, save_record, Store, EXPENSES_KEY};

/// Repository for expense persistence
pub struct ExpenseRepository {
    store: Arc<dyn Store>,
    expenses: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            expenses: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses; a missing record is an empty list
    pub fn load(&self) -> Result<(), TrackerError> {
        let loaded: Option<Vec<Expense>> = load_record(self.store.as_ref(), EXPENSES_KEY)?;

        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *expenses = loaded.unwrap_or_default();
        Ok(())
    }

    /// Save the full expense list, reloading the cache if the write fails
    pub fn save(&self) -> Result<(), TrackerError> {
        let written = {
            let expenses = self
                .expenses
                .read()
                .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
            save_record(self.store.as_ref(), EXPENSES_KEY, &*expenses)
        };

        if let Err(err) = written {
            warn!(key = EXPENSES_KEY, error = %err, "save failed, reloading cached record");
            if let Err(reload) = self.load() {
                warn!(key = EXPENSES_KEY, error = %reload, "reload after failed save failed");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TrackerError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(expenses.iter().find(|e| e.id == id).cloned())
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, TrackerError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(expenses.clone())
    }

    /// Get expenses dated within a month
    pub fn get_for_month(&self, month: &MonthKey) -> Result<Vec<Expense>, TrackerError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(expenses
            .iter()
            .filter(|e| month.contains(e.date))
            .cloned()
            .collect())
    }

    /// Insert a new expense or replace the one with the same ID in place
    pub fn upsert(&self, expense: Expense) -> Result<(), TrackerError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => expenses.push(expense),
        }
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, TrackerError> {
        let mut expenses = self
            .expenses
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        Ok(expenses.len() != before)
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        let expenses = self
            .expenses
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(expenses.len())
    }
}
