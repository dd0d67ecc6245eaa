//! Category service
//!
//! Provides the category registry operations on top of the storage layer:
//! add, rename and delete, each persisted immediately.
//!
//! The service never touches budgets. After a change, callers that care about
//! budget drift run [`BudgetReconciler`](crate::services::BudgetReconciler).

use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};
use crate::models::category::normalize_name;
use crate::models::{CategoryRegistry, CategoryValidationError};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The current registry
    pub fn list(&self) -> TrackerResult<CategoryRegistry> {
        self.storage.categories.get()
    }

    /// Category names in registry order
    pub fn names(&self) -> TrackerResult<Vec<String>> {
        self.storage.categories.names()
    }

    /// Exact, case-sensitive lookup
    pub fn exists(&self, name: &str) -> TrackerResult<bool> {
        Ok(self.storage.categories.get()?.contains(name))
    }

    /// Add a category at the end of the list
    ///
    /// Adding a name that already exists is not an error; it returns
    /// `Ok(false)` and writes nothing.
    pub fn add_category(&self, name: &str) -> TrackerResult<bool> {
        let name = normalize_name(name).map_err(validation_error)?;

        let inserted = self.storage.categories.modify(|r| r.add(name))?;
        if !inserted {
            debug!(category = name, "category already exists, ignoring add");
            return Ok(false);
        }

        self.storage.categories.save()?;
        info!(category = name, "added category");
        Ok(true)
    }

    /// Rename a category in place
    ///
    /// Returns `Ok(false)` if `old_name` does not exist or the name is
    /// unchanged. Renaming onto another existing category fails with
    /// [`TrackerError::Duplicate`].
    pub fn update_category(&self, old_name: &str, new_name: &str) -> TrackerResult<bool> {
        let new_name = normalize_name(new_name).map_err(validation_error)?;

        let renamed = self
            .storage
            .categories
            .modify(|r| r.rename(old_name, new_name))?
            .map_err(validation_error)?;

        if !renamed {
            debug!(from = old_name, to = new_name, "nothing to rename");
            return Ok(false);
        }

        self.storage.categories.save()?;
        info!(from = old_name, to = new_name, "renamed category");
        Ok(true)
    }

    /// Delete a category
    ///
    /// Returns `Ok(false)` if no category had that name.
    pub fn delete_category(&self, name: &str) -> TrackerResult<bool> {
        let removed = self.storage.categories.modify(|r| r.remove(name))?;
        if !removed {
            debug!(category = name, "no such category to delete");
            return Ok(false);
        }

        self.storage.categories.save()?;
        info!(category = name, "deleted category");
        Ok(true)
    }
}

fn validation_error(err: CategoryValidationError) -> TrackerError {
    match err {
        CategoryValidationError::DuplicateName(name) => TrackerError::duplicate_category(name),
        other => TrackerError::Validation(other.to_string()),
    }
}
