//! Export module for Pennywise
//!
//! Provides expense export to CSV (spreadsheet-compatible).

pub mod csv;

pub use self::csv::{default_file_name, export_expenses_csv, write_expenses_csv, CSV_HEADER};
