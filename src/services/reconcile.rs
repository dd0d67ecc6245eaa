//! Budget reconciliation against the live category list
//!
//! After categories are added, renamed or deleted, a month's budget can name
//! categories that no longer exist or miss new ones. The reconciler reads the
//! current registry and hands it to [`BudgetService::reconcile`].

use tracing::debug;

use crate::error::TrackerResult;
use crate::models::{Drift, MonthKey, Reconciliation};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Keeps monthly budgets in line with the category registry
pub struct BudgetReconciler<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetReconciler<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Drift between a month's budget and the current categories
    pub fn drift(&self, month: &MonthKey) -> TrackerResult<Drift> {
        let categories = self.storage.categories.names()?;
        BudgetService::new(self.storage).drift(month, &categories)
    }

    /// Reconcile one month against the current categories
    pub fn reconcile_month(&self, month: MonthKey) -> TrackerResult<Reconciliation> {
        let categories = self.storage.categories.names()?;
        BudgetService::new(self.storage).reconcile(month, &categories)
    }

    /// Reconcile every month that has a stored budget
    ///
    /// Returns the months whose budget was rewritten.
    pub fn reconcile_all(&self) -> TrackerResult<Vec<MonthKey>> {
        let categories = self.storage.categories.names()?;
        let service = BudgetService::new(self.storage);

        let mut changed = Vec::new();
        for month in service.months()? {
            if service.reconcile(month, &categories)?.changed() {
                changed.push(month);
            }
        }

        debug!(changed = changed.len(), "reconciled stored months");
        Ok(changed)
    }
}
