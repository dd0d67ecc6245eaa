//! Display formatting for terminal output
//!
//! Provides utilities for formatting categories, budgets and expenses for
//! terminal display. Every formatter returns a `String`.

pub mod budget;
pub mod category;
pub mod expense;

pub use budget::{format_drift, format_month_list, format_monthly_budget, format_reconciliation};
pub use category::format_category_list;
pub use expense::{format_expense_details, format_expense_register, format_expense_row};
