//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod expense;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{MonthKey, MonthKeyParseError};

/// Parse a `--month` argument, defaulting to the current month
pub fn parse_month(arg: Option<&str>) -> TrackerResult<MonthKey> {
    match arg {
        Some(s) => parse_month_relative_to(s, MonthKey::current()),
        None => Ok(MonthKey::current()),
    }
}

/// Parse a month relative to `current`
///
/// Accepts:
/// - "current", "this", "now"
/// - "last", "prev", "previous", "next"
/// - a month key such as "2024-00" (zero-based month)
/// - a month name with or without a year: "March 2024", "Mar"
pub fn parse_month_relative_to(s: &str, current: MonthKey) -> TrackerResult<MonthKey> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "current" | "this" | "now" => return Ok(current),
        "last" | "prev" | "previous" => return Ok(current.prev()),
        "next" => return Ok(current.next()),
        _ => {}
    }

    if s.contains('-') {
        return s
            .parse()
            .map_err(|e: MonthKeyParseError| TrackerError::Validation(e.to_string()));
    }

    let with_year = if s.chars().any(|c| c.is_ascii_digit()) {
        format!("1 {}", s)
    } else {
        format!("1 {} {}", s, current.year())
    };

    NaiveDate::parse_from_str(&with_year, "%d %B %Y")
        .map(MonthKey::from_date)
        .map_err(|_| {
            TrackerError::Validation(format!(
                "Unrecognized month '{}'. Use a key like 2024-00, a name like 'March 2024', or current/last/next",
                s
            ))
        })
}
