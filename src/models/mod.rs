//! Core data models for Pennywise
//!
//! This module contains the data structures of the expense-tracking domain:
//! month keys, the category registry, monthly budgets and expenses. All of
//! them are plain values; persistence lives in `storage`.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod month;

pub use budget::{BudgetLedger, BudgetStatus, Drift, MonthlyBudget, Reconciliation};
pub use category::{CategoryRegistry, CategoryValidationError, DEFAULT_CATEGORIES};
pub use expense::{totals_by_category, Expense, ExpenseData, ExpenseValidationError};
pub use ids::ExpenseId;
pub use month::{MonthKey, MonthKeyParseError};
