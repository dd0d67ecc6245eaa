//! Expense model
//!
//! An expense is a single recorded outflow: an amount spent on a date under a
//! category label, with an optional note.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::month::MonthKey;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Amount spent (positive)
    pub amount: f64,

    pub date: NaiveDate,

    /// Category label; not required to exist in the category registry
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The user-editable fields of an expense
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseData {
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub note: Option<String>,
}

impl ExpenseData {
    pub fn new(amount: f64, date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            amount,
            date,
            category: category.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Trim text fields and drop blank notes
    pub fn normalized(mut self) -> Self {
        self.category = self.category.trim().to_string();
        self.note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ExpenseValidationError::InvalidAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }

        Ok(())
    }
}

impl Expense {
    /// Create a new expense with a fresh ID
    pub fn new(data: ExpenseData) -> Self {
        Self::with_id(ExpenseId::new(), data)
    }

    pub fn with_id(id: ExpenseId, data: ExpenseData) -> Self {
        Self {
            id,
            amount: data.amount,
            date: data.date,
            category: data.category,
            note: data.note,
        }
    }

    pub fn data(&self) -> ExpenseData {
        ExpenseData {
            amount: self.amount,
            date: self.date,
            category: self.category.clone(),
            note: self.note.clone(),
        }
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Check whether the expense falls in an inclusive date range
    pub fn in_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
        from.map_or(true, |f| self.date >= f) && to.map_or(true, |t| self.date <= t)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2} {}", self.date, self.amount, self.category)?;
        if let Some(note) = &self.note {
            write!(f, " ({})", note)?;
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    InvalidAmount(f64),
    MissingCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(amount) => {
                write!(f, "Expense amount must be a positive number (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Expense category cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Sum of expense amounts per category
pub fn totals_by_category<'a, I>(expenses: I) -> std::collections::BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals = std::collections::BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new(ExpenseData::new(12.5, date(2024, 1, 3), "Food").with_note("lunch"));
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.note.as_deref(), Some("lunch"));
        assert_eq!(expense.month().to_string(), "2024-00");
    }

    #[test]
    fn test_validation() {
        let ok = ExpenseData::new(1.0, date(2024, 1, 1), "Food");
        assert!(ok.validate().is_ok());

        let zero = ExpenseData::new(0.0, date(2024, 1, 1), "Food");
        assert_eq!(zero.validate(), Err(ExpenseValidationError::InvalidAmount(0.0)));

        let negative = ExpenseData::new(-5.0, date(2024, 1, 1), "Food");
        assert!(negative.validate().is_err());

        let nan = ExpenseData::new(f64::NAN, date(2024, 1, 1), "Food");
        assert!(nan.validate().is_err());

        let blank = ExpenseData::new(5.0, date(2024, 1, 1), "  ");
        assert_eq!(blank.validate(), Err(ExpenseValidationError::MissingCategory));
    }

    #[test]
    fn test_normalized_drops_blank_note() {
        let data = ExpenseData::new(5.0, date(2024, 1, 1), " Food ")
            .with_note("   ")
            .normalized();
        assert_eq!(data.category, "Food");
        assert!(data.note.is_none());
    }

    #[test]
    fn test_in_range() {
        let expense = Expense::new(ExpenseData::new(5.0, date(2024, 3, 10), "Food"));
        assert!(expense.in_range(None, None));
        assert!(expense.in_range(Some(date(2024, 3, 10)), Some(date(2024, 3, 10))));
        assert!(!expense.in_range(Some(date(2024, 3, 11)), None));
        assert!(!expense.in_range(None, Some(date(2024, 3, 9))));
    }

    #[test]
    fn test_serialization_layout() {
        let expense = Expense::new(ExpenseData::new(9.99, date(2024, 2, 29), "Bills"));
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["date"], "2024-02-29");
        assert_eq!(json["category"], "Bills");
        assert!(json.get("note").is_none());

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_totals_by_category() {
        let expenses = vec![
            Expense::new(ExpenseData::new(10.0, date(2024, 1, 1), "Food")),
            Expense::new(ExpenseData::new(5.0, date(2024, 1, 2), "Food")),
            Expense::new(ExpenseData::new(20.0, date(2024, 1, 3), "Bills")),
        ];
        let totals = totals_by_category(&expenses);
        assert_eq!(totals.get("Food"), Some(&15.0));
        assert_eq!(totals.get("Bills"), Some(&20.0));
    }
}
