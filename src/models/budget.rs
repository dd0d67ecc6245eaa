//! Monthly budgets and the budget ledger
//!
//! A [`MonthlyBudget`] maps category names to allocated amounts for one month;
//! the [`BudgetLedger`] holds one of them per [`MonthKey`]. Both are pure values
//! that know nothing about storage or about the live category registry. The
//! ledger's allocation algorithms take the category list as an argument, and
//! callers decide when to reconcile.
//!
//! Amounts are non-negative `f64` values. Validation of user input happens at
//! the service boundary; nothing in here clamps or rejects amounts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::month::MonthKey;

/// How a category stands in a month's budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStatus {
    /// No entry, or an explicit zero
    Unbudgeted,
    /// A positive allocation
    Budgeted(f64),
}

impl BudgetStatus {
    pub fn is_budgeted(&self) -> bool {
        matches!(self, Self::Budgeted(_))
    }

    pub fn amount(&self) -> f64 {
        match self {
            Self::Unbudgeted => 0.0,
            Self::Budgeted(amount) => *amount,
        }
    }
}

/// Category -> allocated amount for a single month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyBudget {
    amounts: BTreeMap<String, f64>,
}

impl MonthlyBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a budget giving each distinct category an equal share of `total`
    ///
    /// Returns `None` for an empty category list.
    pub fn equal_split<S: AsRef<str>>(total: f64, categories: &[S]) -> Option<Self> {
        let distinct: BTreeSet<&str> = categories.iter().map(|c| c.as_ref()).collect();
        if distinct.is_empty() {
            return None;
        }

        let per_category = total / distinct.len() as f64;
        Some(distinct.into_iter().map(|c| (c, per_category)).collect())
    }

    /// The stored entry for a category, if any (explicit zeros included)
    pub fn get(&self, category: &str) -> Option<f64> {
        self.amounts.get(category).copied()
    }

    /// The allocated amount, treating absent categories as 0
    pub fn amount(&self, category: &str) -> f64 {
        self.get(category).unwrap_or(0.0)
    }

    pub fn status(&self, category: &str) -> BudgetStatus {
        match self.get(category) {
            Some(amount) if amount > 0.0 => BudgetStatus::Budgeted(amount),
            _ => BudgetStatus::Unbudgeted,
        }
    }

    /// Set or overwrite one entry; zero amounts are stored, not removed
    pub fn set(&mut self, category: impl Into<String>, amount: f64) {
        self.amounts.insert(category.into(), amount);
    }

    pub fn contains(&self, category: &str) -> bool {
        self.amounts.contains_key(category)
    }

    /// Sum of every entry
    pub fn total(&self) -> f64 {
        self.amounts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.amounts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.amounts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MonthlyBudget {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            amounts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Divergence between a month's budgeted categories and the live category list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drift {
    /// Live categories with no entry in the budget, in live order
    pub missing: Vec<String>,
    /// Budgeted categories that no longer exist, in key order
    pub extra: Vec<String>,
}

impl Drift {
    /// Symmetric difference between `budget`'s keys and `categories`
    pub fn between<S: AsRef<str>>(budget: &MonthlyBudget, categories: &[S]) -> Self {
        let names: Vec<&str> = categories.iter().map(|c| c.as_ref()).collect();
        let live: BTreeSet<&str> = names.iter().copied().collect();

        let mut seen = BTreeSet::new();
        let missing = names
            .iter()
            .filter(|c| !budget.contains(c) && seen.insert(**c))
            .map(|c| c.to_string())
            .collect();

        let extra = budget
            .categories()
            .filter(|c| !live.contains(c))
            .map(str::to_string)
            .collect();

        Self { missing, extra }
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Result of a reconciliation pass
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// The budget already matches the category list
    InSync,
    /// The month's total was spread evenly over the live categories
    Redistributed { total: f64, categories: usize },
    /// Drift exists but there is nothing to spread (zero total or no categories)
    Unresolved(Drift),
}

impl Reconciliation {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Redistributed { .. })
    }
}

/// Every month's budget, keyed by month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetLedger {
    months: BTreeMap<MonthKey, MonthlyBudget>,
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The budget for `month`, or an empty one if nothing has been stored
    pub fn monthly_budget(&self, month: &MonthKey) -> MonthlyBudget {
        self.months.get(month).cloned().unwrap_or_default()
    }

    pub fn get(&self, month: &MonthKey) -> Option<&MonthlyBudget> {
        self.months.get(month)
    }

    /// Replace the whole budget for `month`
    pub fn set_monthly_budget(&mut self, month: MonthKey, budget: MonthlyBudget) {
        self.months.insert(month, budget);
    }

    /// Set one category's amount, keeping the month's other entries
    pub fn set_category_budget(&mut self, month: MonthKey, category: impl Into<String>, amount: f64) {
        let mut budget = self.monthly_budget(&month);
        budget.set(category, amount);
        self.set_monthly_budget(month, budget);
    }

    /// Replace the month with an equal share of `total` per category
    ///
    /// Any per-category adjustments are discarded. An empty category list
    /// leaves the ledger untouched. Returns `true` if the month was written.
    pub fn distribute_equally<S: AsRef<str>>(
        &mut self,
        month: MonthKey,
        total: f64,
        categories: &[S],
    ) -> bool {
        match MonthlyBudget::equal_split(total, categories) {
            Some(budget) => {
                self.set_monthly_budget(month, budget);
                true
            }
            None => false,
        }
    }

    /// Spread the month's current total evenly over `categories`
    ///
    /// No-op when the total is not positive or `categories` is empty.
    /// Returns `true` if the month was written.
    pub fn redistribute<S: AsRef<str>>(&mut self, month: MonthKey, categories: &[S]) -> bool {
        let total = self.monthly_budget(&month).total();
        if total > 0.0 && !categories.is_empty() {
            self.distribute_equally(month, total, categories)
        } else {
            false
        }
    }

    /// Compare the month's budgeted categories against the live list
    pub fn drift<S: AsRef<str>>(&self, month: &MonthKey, categories: &[S]) -> Drift {
        Drift::between(&self.monthly_budget(month), categories)
    }

    /// Redistribute the month only if its categories have drifted
    ///
    /// Running this again with the same category list never changes the
    /// ledger.
    pub fn reconcile<S: AsRef<str>>(&mut self, month: MonthKey, categories: &[S]) -> Reconciliation {
        let drift = self.drift(&month, categories);
        if drift.is_empty() {
            return Reconciliation::InSync;
        }

        let total = self.monthly_budget(&month).total();
        if self.redistribute(month, categories) {
            Reconciliation::Redistributed {
                total,
                categories: self.monthly_budget(&month).len(),
            }
        } else {
            Reconciliation::Unresolved(drift)
        }
    }

    /// Months with a stored budget, oldest first
    pub fn months(&self) -> impl Iterator<Item = &MonthKey> {
        self.months.keys()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
