//! Service layer for Pennywise
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, persistence of each change, and cross-record
//! operations such as budget reconciliation.

pub mod budget;
pub mod category;
pub mod expense;
pub mod reconcile;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use expense::{ExpenseFilter, ExpenseService};
pub use reconcile::BudgetReconciler;
