//! Spending Report
//!
//! Totals expenses by category, largest first.

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::models::{totals_by_category, Expense, MonthKey};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// How many categories the breakdown shows by default
pub const DEFAULT_TOP_CATEGORIES: usize = 6;

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingByCategory {
    /// Category name
    pub category: String,
    /// Total spent
    pub total: f64,
    /// Share of overall spending, 0-100
    pub percentage: f64,
}

/// Spending breakdown by category
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingReport {
    /// Categories sorted by total, largest first
    pub categories: Vec<SpendingByCategory>,
    /// Total across all expenses, including categories cut by the limit
    pub total_spending: f64,
}

impl SpendingReport {
    /// Generate a spending report for one month
    pub fn generate(storage: &Storage, month: &MonthKey, limit: Option<usize>) -> TrackerResult<Self> {
        let expenses = ExpenseService::new(storage).list_for_month(month)?;
        Ok(Self::from_expenses(&expenses, limit))
    }

    /// Build a breakdown from a set of expenses
    pub fn from_expenses(expenses: &[Expense], limit: Option<usize>) -> Self {
        let total_spending: f64 = expenses.iter().map(|e| e.amount).sum();

        let mut categories: Vec<SpendingByCategory> = totals_by_category(expenses)
            .into_iter()
            .map(|(category, total)| SpendingByCategory {
                percentage: if total_spending > 0.0 {
                    total / total_spending * 100.0
                } else {
                    0.0
                },
                category,
                total,
            })
            .collect();

        // Ties fall back to the name order from the totals map
        categories.sort_by(|a, b| b.total.total_cmp(&a.total));
        if let Some(limit) = limit {
            categories.truncate(limit);
        }

        Self {
            categories,
            total_spending,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        if self.is_empty() {
            return "No spending recorded.\n".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Spending by Category (total {})\n",
            settings.format_amount(self.total_spending)
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<24} {:>12} {:>10.1}%\n",
                row.category,
                settings.format_amount(row.total),
                row.percentage
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseData;
    use chrono::NaiveDate;

    fn expense(amount: f64, category: &str) -> Expense {
        Expense::new(ExpenseData::new(
            amount,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            category,
        ))
    }

    #[test]
    fn test_empty_breakdown() {
        let report = SpendingReport::from_expenses(&[], Some(DEFAULT_TOP_CATEGORIES));
        assert!(report.is_empty());
        assert_eq!(report.total_spending, 0.0);
        assert_eq!(report.format_terminal(&Settings::default()), "No spending recorded.\n");
    }

    #[test]
    fn test_sorted_descending_with_percentages() {
        let expenses = vec![
            expense(10.0, "Food"),
            expense(30.0, "Bills"),
            expense(15.0, "Food"),
            expense(45.0, "Housing"),
        ];

        let report = SpendingReport::from_expenses(&expenses, None);
        let order: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Housing", "Bills", "Food"]);
        assert_eq!(report.categories[2].total, 25.0);
        assert!((report.categories[0].percentage - 45.0).abs() < 1e-9);
        assert_eq!(report.total_spending, 100.0);
    }

    #[test]
    fn test_limit_keeps_overall_total() {
        let expenses: Vec<Expense> = (1..=8)
            .map(|i| expense(i as f64, &format!("Cat{}", i)))
            .collect();

        let report = SpendingReport::from_expenses(&expenses, Some(DEFAULT_TOP_CATEGORIES));
        assert_eq!(report.categories.len(), 6);
        assert_eq!(report.categories[0].category, "Cat8");
        assert_eq!(report.total_spending, 36.0);
    }
}
