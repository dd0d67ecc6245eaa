//! Category repository
//!
//! Loads and saves the ordered category list under the `categories` record.
//! A missing record means a fresh installation and yields the default set.

use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::TrackerError;
use crate::models::CategoryRegistry;

use super::store::{load_record, save_record, Store, CATEGORIES_KEY};

/// Repository for the category list
pub struct CategoryRepository {
    store: Arc<dyn Store>,
    registry: RwLock<CategoryRegistry>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            registry: RwLock::new(CategoryRegistry::default()),
        }
    }

    /// Load categories, falling back to the defaults if none are persisted
    pub fn load(&self) -> Result<(), TrackerError> {
        let loaded: Option<CategoryRegistry> = load_record(self.store.as_ref(), CATEGORIES_KEY)?;

        let mut registry = self
            .registry
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *registry = loaded.unwrap_or_default();
        Ok(())
    }

    /// Save the full category list, reloading the cache if the write fails
    pub fn save(&self) -> Result<(), TrackerError> {
        let written = {
            let registry = self
                .registry
                .read()
                .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
            save_record(self.store.as_ref(), CATEGORIES_KEY, &*registry)
        };

        if let Err(err) = written {
            warn!(key = CATEGORIES_KEY, error = %err, "save failed, reloading cached record");
            if let Err(reload) = self.load() {
                warn!(key = CATEGORIES_KEY, error = %reload, "reload after failed save failed");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Snapshot of the current registry
    pub fn get(&self) -> Result<CategoryRegistry, TrackerError> {
        let registry = self
            .registry
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(registry.clone())
    }

    /// Category names in registry order
    pub fn names(&self) -> Result<Vec<String>, TrackerError> {
        Ok(self.get()?.names().to_vec())
    }

    /// Apply a change to the in-memory registry
    ///
    /// Call `save` afterwards to persist it.
    pub fn modify<R>(&self, f: impl FnOnce(&mut CategoryRegistry) -> R) -> Result<R, TrackerError> {
        let mut registry = self
            .registry
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(f(&mut *registry))
    }
}
