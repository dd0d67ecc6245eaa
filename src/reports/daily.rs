//! Daily Spending Report
//!
//! Sums expenses per calendar day, oldest day first, with a text bar scaled
//! to the busiest day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::models::{Expense, MonthKey};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Width of the bar drawn for the busiest day
const BAR_WIDTH: usize = 30;

/// Spending on a single day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
    /// Number of expenses recorded that day
    pub count: usize,
}

/// Per-day spending totals
#[derive(Debug, Clone, PartialEq)]
pub struct DailySpendingReport {
    /// Days with at least one expense, in date order
    pub days: Vec<DailyTotal>,
    pub total_spending: f64,
}

impl DailySpendingReport {
    /// Generate the per-day totals for one month
    pub fn generate(storage: &Storage, month: &MonthKey) -> TrackerResult<Self> {
        let expenses = ExpenseService::new(storage).list_for_month(month)?;
        Ok(Self::from_expenses(&expenses))
    }

    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for expense in expenses {
            let entry = by_day.entry(expense.date).or_insert((0.0, 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let days: Vec<DailyTotal> = by_day
            .into_iter()
            .map(|(date, (total, count))| DailyTotal { date, total, count })
            .collect();
        let total_spending = days.iter().map(|d| d.total).sum();

        Self {
            days,
            total_spending,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The day with the highest total; the earliest wins a tie
    pub fn peak(&self) -> Option<&DailyTotal> {
        self.days
            .iter()
            .reduce(|best, day| if day.total > best.total { day } else { best })
    }

    /// Average over the days that had spending
    pub fn average_per_active_day(&self) -> f64 {
        if self.days.is_empty() {
            0.0
        } else {
            self.total_spending / self.days.len() as f64
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let Some(peak) = self.peak() else {
            return "No expenses to display.\n".to_string();
        };

        let mut output = String::new();
        output.push_str("Daily Spending\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for day in &self.days {
            output.push_str(&format!(
                "{:<12} {:>12}  {}\n",
                day.date.format(&settings.date_format).to_string(),
                settings.format_amount(day.total),
                bar(day.total, peak.total)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total {} over {} day(s), average {} per day\n",
            settings.format_amount(self.total_spending),
            self.days.len(),
            settings.format_amount(self.average_per_active_day())
        ));
        output
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.max(1))
}
