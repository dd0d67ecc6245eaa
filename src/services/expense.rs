//! Expense service
//!
//! Provides expense CRUD on top of the storage layer. Listings are returned
//! newest first.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseData, ExpenseId, MonthKey};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expense listings
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses dated within this month
    pub month: Option<MonthKey>,
    /// Inclusive start date
    pub from: Option<NaiveDate>,
    /// Inclusive end date
    pub to: Option<NaiveDate>,
    /// Exact category name
    pub category: Option<String>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Only expenses dated exactly `date`
    pub fn on(self, date: NaiveDate) -> Self {
        self.date_range(Some(date), Some(date))
    }

    /// True when a date or date range is set
    pub fn has_dates(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| m.contains(expense.date))
            && expense.in_range(self.from, self.to)
            && self
                .category
                .as_deref()
                .map_or(true, |c| expense.category == c)
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn add(&self, data: ExpenseData) -> TrackerResult<Expense> {
        let data = validated(data)?;
        let expense = Expense::new(data);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        info!(id = %expense.id, amount = expense.amount, category = %expense.category, "added expense");
        Ok(expense)
    }

    /// Replace the editable fields of an existing expense
    pub fn update(&self, id: ExpenseId, data: ExpenseData) -> TrackerResult<Expense> {
        if self.storage.expenses.get(id)?.is_none() {
            return Err(TrackerError::expense_not_found(id.to_string()));
        }

        let data = validated(data)?;
        let expense = Expense::with_id(id, data);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        info!(id = %id, "updated expense");
        Ok(expense)
    }

    /// Delete an expense, returning what was removed
    pub fn delete(&self, id: ExpenseId) -> TrackerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        info!(id = %id, "deleted expense");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by a user-typed identifier (full ID or short prefix)
    ///
    /// An identifier that matches more than one expense is rejected.
    pub fn find(&self, identifier: &str) -> TrackerResult<Expense> {
        let mut matches = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches(identifier));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense),
            (None, _) => Err(TrackerError::expense_not_found(identifier)),
            (Some(_), Some(_)) => Err(TrackerError::Validation(format!(
                "Identifier '{}' matches more than one expense",
                identifier
            ))),
        }
    }

    /// All expenses, newest first
    pub fn list(&self) -> TrackerResult<Vec<Expense>> {
        self.list_filtered(&ExpenseFilter::new())
    }

    /// Expenses dated within `month`, newest first
    pub fn list_for_month(&self, month: &MonthKey) -> TrackerResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_for_month(month)?;
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Expenses matching `filter`, newest first
    pub fn list_filtered(&self, filter: &ExpenseFilter) -> TrackerResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();

        sort_newest_first(&mut expenses);
        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        debug!(count = expenses.len(), "listed expenses");
        Ok(expenses)
    }
}

fn validated(data: ExpenseData) -> TrackerResult<ExpenseData> {
    let data = data.normalized();
    data.validate().map_err(|e| {
        warn!(error = %e, "rejected expense");
        TrackerError::Validation(e.to_string())
    })?;
    Ok(data)
}

// Stable, so same-day expenses keep insertion order
fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}
