//! Reports module for Pennywise
//!
//! Provides the monthly budget overview, the spending breakdown and the
//! per-day spending totals.

pub mod budget_overview;
pub mod daily;
pub mod spending;

pub use budget_overview::{BudgetOverviewReport, CategoryBudgetLine};
pub use daily::{DailySpendingReport, DailyTotal};
pub use spending::{SpendingByCategory, SpendingReport, DEFAULT_TOP_CATEGORIES};
