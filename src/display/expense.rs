//! Expense display formatting
//!
//! Formats expenses as a register for terminal output.

use crate::config::settings::Settings;
use crate::models::Expense;

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, settings: &Settings) -> String {
    format!(
        "{:<13} {:<10} {:<20} {:>12}  {}",
        expense.id.short(),
        expense.date.format(&settings.date_format),
        truncate(&expense.category, 20),
        settings.format_amount(expense.amount),
        expense.note.as_deref().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

/// Format a list of expenses with a total line
pub fn format_expense_register(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13} {:<10} {:<20} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Note"
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, settings));
        output.push('\n');
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&"-".repeat(64));
    output.push('\n');
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        expenses.len(),
        settings.format_amount(total)
    ));

    output
}

/// Format the details of one expense
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("ID:       {}\n", expense.id.as_uuid()));
    output.push_str(&format!("Date:     {}\n", expense.date.format(&settings.date_format)));
    output.push_str(&format!("Amount:   {}\n", settings.format_amount(expense.amount)));
    output.push_str(&format!("Category: {}\n", expense.category));
    if let Some(note) = &expense.note {
        output.push_str(&format!("Note:     {}\n", note));
    }
    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseData;
    use chrono::NaiveDate;

    fn sample() -> Expense {
        Expense::new(
            ExpenseData::new(12.5, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), "Food")
                .with_note("lunch"),
        )
    }

    #[test]
    fn test_format_expense_row() {
        let expense = sample();
        let row = format_expense_row(&expense, &Settings::default());

        assert!(row.starts_with(&expense.id.short()));
        assert!(row.contains("2024-01-03"));
        assert!(row.contains("$12.50"));
        assert!(row.ends_with("lunch"));
    }

    #[test]
    fn test_format_register_total() {
        let output = format_expense_register(&[sample(), sample()], &Settings::default());
        assert!(output.contains("2 expense(s), total $25.00"));
    }

    #[test]
    fn test_format_empty_register() {
        assert_eq!(
            format_expense_register(&[], &Settings::default()),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Food", 20), "Food");
        assert_eq!(truncate("A very long category name", 10), "A very ...");
    }
}
