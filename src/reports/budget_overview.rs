//! Budget Overview Report
//!
//! Compares a month's budget against what was actually spent, category by
//! category, in registry order.

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::models::{totals_by_category, BudgetStatus, Expense, MonthKey, MonthlyBudget};
use crate::services::{BudgetService, CategoryService, ExpenseService};
use crate::storage::Storage;

/// A row in the budget report for a single category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudgetLine {
    /// Category name
    pub category: String,
    /// Budget status for the month
    pub status: BudgetStatus,
    /// Amount spent in the month
    pub spent: f64,
}

impl CategoryBudgetLine {
    /// Amount budgeted (zero when unbudgeted)
    pub fn budgeted(&self) -> f64 {
        self.status.amount()
    }

    /// Budgeted minus spent; negative when over budget
    pub fn remaining(&self) -> f64 {
        self.budgeted() - self.spent
    }

    /// Spent as a percentage of budgeted (0 when nothing is budgeted)
    pub fn percentage(&self) -> f64 {
        percentage_of(self.spent, self.budgeted())
    }

    /// Check if spending exceeded a positive budget
    pub fn is_over_budget(&self) -> bool {
        over_budget(self.spent, self.budgeted())
    }
}

/// Budget Overview Report
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverviewReport {
    /// The month this report covers
    pub month: MonthKey,
    /// Categories with a positive budget, in registry order
    pub budgeted: Vec<CategoryBudgetLine>,
    /// Categories without a budget (absent or zero), in registry order
    pub unbudgeted: Vec<CategoryBudgetLine>,
    /// Sum of every amount in the month's budget
    pub total_budgeted: f64,
    /// Sum of every expense in the month, registered category or not
    pub total_spent: f64,
}

impl BudgetOverviewReport {
    /// Generate the overview for a month from storage
    pub fn generate(storage: &Storage, month: &MonthKey) -> TrackerResult<Self> {
        let categories = CategoryService::new(storage).names()?;
        let budget = BudgetService::new(storage).get_monthly_budget(month)?;
        let expenses = ExpenseService::new(storage).list_for_month(month)?;

        Ok(Self::build(*month, &budget, &categories, &expenses))
    }

    /// Build the overview from already-loaded data
    ///
    /// `expenses` outside `month` are ignored.
    pub fn build<S: AsRef<str>>(
        month: MonthKey,
        budget: &MonthlyBudget,
        categories: &[S],
        expenses: &[Expense],
    ) -> Self {
        let in_month: Vec<&Expense> = expenses.iter().filter(|e| month.contains(e.date)).collect();
        let spent_by_category = totals_by_category(in_month.iter().copied());

        let (budgeted, unbudgeted): (Vec<_>, Vec<_>) = categories
            .iter()
            .map(|c| {
                let category = c.as_ref();
                CategoryBudgetLine {
                    category: category.to_string(),
                    status: budget.status(category),
                    spent: spent_by_category.get(category).copied().unwrap_or(0.0),
                }
            })
            .partition(|line| line.status.is_budgeted());

        Self {
            month,
            budgeted,
            unbudgeted,
            total_budgeted: budget.total(),
            total_spent: in_month.iter().map(|e| e.amount).sum(),
        }
    }

    pub fn total_remaining(&self) -> f64 {
        self.total_budgeted - self.total_spent
    }

    pub fn total_percentage(&self) -> f64 {
        percentage_of(self.total_spent, self.total_budgeted)
    }

    pub fn is_over_budget(&self) -> bool {
        over_budget(self.total_spent, self.total_budgeted)
    }

    /// Categories whose spending exceeded their budget
    pub fn over_budget_categories(&self) -> impl Iterator<Item = &CategoryBudgetLine> {
        self.budgeted.iter().filter(|l| l.is_over_budget())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Overview - {}\n", self.month.label()));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>8}\n",
            "Category", "Budgeted", "Spent", "Remaining", "Used"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.budgeted.is_empty() {
            output.push_str("  No categories budgeted for this month.\n");
        }

        for line in &self.budgeted {
            let marker = if line.is_over_budget() { " *" } else { "" };
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>7.0}%{}\n",
                line.category,
                settings.format_amount(line.budgeted()),
                settings.format_amount(line.spent),
                settings.format_amount(line.remaining()),
                line.percentage(),
                marker
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>7.0}%\n",
            "TOTAL",
            settings.format_amount(self.total_budgeted),
            settings.format_amount(self.total_spent),
            settings.format_amount(self.total_remaining()),
            self.total_percentage()
        ));

        if !self.unbudgeted.is_empty() {
            output.push_str("\nUnbudgeted:\n");
            for line in &self.unbudgeted {
                if line.spent > 0.0 {
                    output.push_str(&format!(
                        "  {:<22} spent {}\n",
                        line.category,
                        settings.format_amount(line.spent)
                    ));
                } else {
                    output.push_str(&format!("  {}\n", line.category));
                }
            }
        }

        if self.over_budget_categories().next().is_some() {
            output.push_str("\n* Over budget\n");
        }

        output
    }
}

fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

fn over_budget(spent: f64, budgeted: f64) -> bool {
    budgeted > 0.0 && spent > budgeted
}
