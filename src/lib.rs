//! Pennywise - local-first personal expense tracker
//!
//! This library provides the core of the Pennywise expense tracker: an
//! ordered category registry, a per-month budget ledger that can split a
//! total evenly across categories and rebalance itself when the category
//! list changes, and an expense log.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (month keys, categories, budgets, expenses)
//! - `storage`: Key-value record store and repositories
//! - `services`: Business logic layer
//! - `reports`: Budget overview, spending breakdown and daily totals
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `pennywise` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pennywise::models::MonthKey;
//! use pennywise::services::{BudgetReconciler, BudgetService, CategoryService};
//! use pennywise::storage::Storage;
//!
//! let storage = Storage::in_memory()?;
//! let month = MonthKey::current();
//!
//! let names = CategoryService::new(&storage).names()?;
//! BudgetService::new(&storage).distribute_budget_equally(month, 800.0, &names)?;
//!
//! CategoryService::new(&storage).add_category("Pets")?;
//! BudgetReconciler::new(&storage).reconcile_month(month)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
