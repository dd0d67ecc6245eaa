//! Budget service
//!
//! Provides the budget ledger operations: per-month reads, manual amounts,
//! equal distribution of a total, and redistribution after the category list
//! changes. Every mutation is saved immediately.

use tracing::{debug, info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Drift, MonthKey, MonthlyBudget, Reconciliation};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The budget for a month; empty if none has been set
    pub fn get_monthly_budget(&self, month: &MonthKey) -> TrackerResult<MonthlyBudget> {
        debug!(%month, "reading monthly budget");
        self.storage.budget.get_month(month)
    }

    /// Months with a stored budget, oldest first
    pub fn months(&self) -> TrackerResult<Vec<MonthKey>> {
        Ok(self.storage.budget.get_all()?.months().copied().collect())
    }

    /// Replace a month's budget wholesale
    pub fn set_monthly_budget(&self, month: MonthKey, budget: MonthlyBudget) -> TrackerResult<()> {
        for (category, amount) in budget.iter() {
            validate_amount(category, amount)?;
        }

        let entries = budget.len();
        self.storage
            .budget
            .modify(|l| l.set_monthly_budget(month, budget))?;
        self.storage.budget.save()?;

        info!(%month, entries, "replaced monthly budget");
        Ok(())
    }

    /// Set a single category's amount for a month
    ///
    /// The category does not have to be registered. Other entries for the
    /// month are left alone.
    pub fn set_category_budget(
        &self,
        month: MonthKey,
        category: &str,
        amount: f64,
    ) -> TrackerResult<()> {
        validate_amount(category, amount)?;

        self.storage
            .budget
            .modify(|l| l.set_category_budget(month, category, amount))?;
        self.storage.budget.save()?;

        info!(%month, category, amount, "set category budget");
        Ok(())
    }

    /// Reset a category's amount to zero, leaving it unbudgeted
    pub fn clear_category_budget(&self, month: MonthKey, category: &str) -> TrackerResult<()> {
        self.set_category_budget(month, category, 0.0)
    }

    /// Replace the month with `total` split evenly across `categories`
    ///
    /// Returns `Ok(false)` and writes nothing when `categories` is empty.
    pub fn distribute_budget_equally<S: AsRef<str>>(
        &self,
        month: MonthKey,
        total: f64,
        categories: &[S],
    ) -> TrackerResult<bool> {
        validate_amount("total", total)?;

        let written = self
            .storage
            .budget
            .modify(|l| l.distribute_equally(month, total, categories))?;

        if !written {
            debug!(%month, "no categories to distribute over");
            return Ok(false);
        }

        self.storage.budget.save()?;
        info!(%month, total, categories = categories.len(), "distributed budget equally");
        Ok(true)
    }

    /// Spread the month's current total evenly over `categories`
    ///
    /// Returns `Ok(false)` when the month has no positive total or the
    /// category list is empty.
    pub fn redistribute_budget<S: AsRef<str>>(
        &self,
        month: MonthKey,
        categories: &[S],
    ) -> TrackerResult<bool> {
        let written = self
            .storage
            .budget
            .modify(|l| l.redistribute(month, categories))?;

        if !written {
            debug!(%month, "nothing to redistribute");
            return Ok(false);
        }

        self.storage.budget.save()?;
        info!(%month, categories = categories.len(), "redistributed budget");
        Ok(true)
    }

    /// Categories missing from or stale in the month's budget
    pub fn drift<S: AsRef<str>>(&self, month: &MonthKey, categories: &[S]) -> TrackerResult<Drift> {
        Ok(Drift::between(&self.storage.budget.get_month(month)?, categories))
    }

    /// Redistribute the month if its budgeted categories have drifted from
    /// `categories`
    ///
    /// Saves only when the ledger changed, so calling this repeatedly is
    /// cheap and idempotent.
    pub fn reconcile<S: AsRef<str>>(
        &self,
        month: MonthKey,
        categories: &[S],
    ) -> TrackerResult<Reconciliation> {
        let outcome = self
            .storage
            .budget
            .modify(|l| l.reconcile(month, categories))?;

        match &outcome {
            Reconciliation::InSync => debug!(%month, "budget in sync with categories"),
            Reconciliation::Redistributed { total, categories } => {
                self.storage.budget.save()?;
                info!(%month, total, categories, "reconciled budget");
            }
            Reconciliation::Unresolved(drift) => {
                debug!(
                    %month,
                    missing = drift.missing.len(),
                    extra = drift.extra.len(),
                    "budget drift left in place"
                );
            }
        }

        Ok(outcome)
    }
}

fn validate_amount(category: &str, amount: f64) -> TrackerResult<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        warn!(category, amount, "rejected budget amount");
        Err(TrackerError::Validation(format!(
            "Budget amount for '{}' must be a non-negative number (got {})",
            category, amount
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn setup() -> Storage {
        Storage::in_memory().unwrap()
    }

    fn jan() -> MonthKey {
        "2024-00".parse().unwrap()
    }

    #[test]
    fn test_unknown_month_is_empty() {
        let storage = setup();
        let service = BudgetService::new(&storage);
        assert!(service.get_monthly_budget(&jan()).unwrap().is_empty());
    }

    #[test]
    fn test_set_category_budget_keeps_other_entries() {
        let storage = setup();
        let service = BudgetService::new(&storage);

        service.set_category_budget(jan(), "Food", 50.0).unwrap();
        service.set_category_budget(jan(), "Bills", 70.0).unwrap();

        let budget = service.get_monthly_budget(&jan()).unwrap();
        assert_eq!(budget.get("Food"), Some(50.0));
        assert_eq!(budget.get("Bills"), Some(70.0));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let storage = setup();
        let service = BudgetService::new(&storage);

        let err = service.set_category_budget(jan(), "Food", -1.0).unwrap_err();
        assert!(err.is_validation());
        assert!(service.get_monthly_budget(&jan()).unwrap().is_empty());

        let err = service
            .distribute_budget_equally(jan(), f64::NAN, &["Food"])
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_clear_keeps_zero_entry() {
        let storage = setup();
        let service = BudgetService::new(&storage);

        service.set_category_budget(jan(), "Food", 50.0).unwrap();
        service.clear_category_budget(jan(), "Food").unwrap();

        let budget = service.get_monthly_budget(&jan()).unwrap();
        assert_eq!(budget.get("Food"), Some(0.0));
        assert!(!budget.status("Food").is_budgeted());
    }

    #[test]
    fn test_distribute_equally() {
        let storage = setup();
        let service = BudgetService::new(&storage);

        assert!(service
            .distribute_budget_equally(jan(), 100.0, &["Food", "Transport", "Bills"])
            .unwrap());

        let budget = service.get_monthly_budget(&jan()).unwrap();
        assert_eq!(budget.len(), 3);
        assert!((budget.amount("Food") - 100.0 / 3.0).abs() < EPSILON);
        assert!((budget.total() - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_distribute_over_no_categories_writes_nothing() {
        let storage = setup();
        let service = BudgetService::new(&storage);
        let none: [&str; 0] = [];

        assert!(!service.distribute_budget_equally(jan(), 100.0, &none).unwrap());
        assert!(service.months().unwrap().is_empty());
    }

    #[test]
    fn test_redistribute_preserves_total() {
        let storage = setup();
        let service = BudgetService::new(&storage);
        service.set_category_budget(jan(), "Food", 30.0).unwrap();
        service.set_category_budget(jan(), "Bills", 90.0).unwrap();

        assert!(service
            .redistribute_budget(jan(), &["Food", "Bills", "Pets"])
            .unwrap());

        let budget = service.get_monthly_budget(&jan()).unwrap();
        assert!((budget.total() - 120.0).abs() < EPSILON);
        assert!((budget.amount("Pets") - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_redistribute_zero_total_is_noop() {
        let storage = setup();
        let service = BudgetService::new(&storage);
        assert!(!service.redistribute_budget(jan(), &["Food"]).unwrap());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let storage = setup();
        let service = BudgetService::new(&storage);
        service
            .distribute_budget_equally(jan(), 90.0, &["Food", "Bills"])
            .unwrap();

        let categories = ["Food", "Bills", "Pets"];
        let first = service.reconcile(jan(), &categories).unwrap();
        assert!(first.changed());

        let snapshot = service.get_monthly_budget(&jan()).unwrap();
        let second = service.reconcile(jan(), &categories).unwrap();
        assert_eq!(second, Reconciliation::InSync);
        assert_eq!(service.get_monthly_budget(&jan()).unwrap(), snapshot);
    }

    #[test]
    fn test_reconcile_without_total_reports_drift() {
        let storage = setup();
        let service = BudgetService::new(&storage);

        match service.reconcile(jan(), &["Food"]).unwrap() {
            Reconciliation::Unresolved(drift) => assert_eq!(drift.missing, vec!["Food"]),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_drift() {
        let storage = setup();
        let service = BudgetService::new(&storage);
        service.set_category_budget(jan(), "Old", 10.0).unwrap();

        let drift = service.drift(&jan(), &["New"]).unwrap();
        assert_eq!(drift.missing, vec!["New"]);
        assert_eq!(drift.extra, vec!["Old"]);
    }
}
