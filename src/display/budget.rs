//! Budget display formatting

use crate::config::settings::Settings;
use crate::models::{Drift, MonthKey, MonthlyBudget, Reconciliation};

/// Format the month selector list, marking months that have a budget
pub fn format_month_list(months: &[MonthKey], budgeted: &[MonthKey], current: MonthKey) -> String {
    let mut output = String::new();

    for month in months {
        let marker = if *month == current { ">" } else { " " };
        let has_budget = if budgeted.contains(month) { " (budget)" } else { "" };
        output.push_str(&format!("{} {}  {}{}\n", marker, month, month.label(), has_budget));
    }

    output
}

/// Format a month's raw budget entries
pub fn format_monthly_budget(month: &MonthKey, budget: &MonthlyBudget, settings: &Settings) -> String {
    if budget.is_empty() {
        return format!("No budget set for {}.\n", month.label());
    }

    let mut output = format!("Budget for {}:\n", month.label());
    for (category, amount) in budget.iter() {
        output.push_str(&format!("  {:<24} {:>12}\n", category, settings.format_amount(amount)));
    }
    output.push_str(&format!(
        "  {:<24} {:>12}\n",
        "Total",
        settings.format_amount(budget.total())
    ));
    output
}

/// Describe the outcome of a reconciliation pass
pub fn format_reconciliation(month: &MonthKey, outcome: &Reconciliation, settings: &Settings) -> String {
    match outcome {
        Reconciliation::InSync => format!("Budget for {} matches the category list.", month.label()),
        Reconciliation::Redistributed { total, categories } => format!(
            "Redistributed {} across {} categories for {}.",
            settings.format_amount(*total),
            categories,
            month.label()
        ),
        Reconciliation::Unresolved(drift) => format!(
            "Budget for {} differs from the category list ({}), but there is no total to redistribute.",
            month.label(),
            format_drift(drift)
        ),
    }
}

/// Summarize drift, e.g. `missing: Pets; stale: Food`
pub fn format_drift(drift: &Drift) -> String {
    let mut parts = Vec::new();
    if !drift.missing.is_empty() {
        parts.push(format!("missing: {}", drift.missing.join(", ")));
    }
    if !drift.extra.is_empty() {
        parts.push(format!("stale: {}", drift.extra.join(", ")));
    }
    parts.join("; ")
}
