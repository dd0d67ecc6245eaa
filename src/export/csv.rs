//! CSV Export functionality
//!
//! Writes expenses to CSV with a `Date,Amount,Category,Note` header,
//! optionally limited to an inclusive date range.

use std::io::Write;

use chrono::NaiveDate;
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Expense;
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

/// Column header of the expense export
pub const CSV_HEADER: [&str; 4] = ["Date", "Amount", "Category", "Note"];

/// Write expenses as CSV, returning the number of rows written
pub fn write_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> TrackerResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for expense in expenses {
        csv_writer.write_record([
            expense.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", expense.amount),
            expense.category.clone(),
            expense.note.clone().unwrap_or_default(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(expenses.len())
}

/// Export stored expenses in a date range to CSV, newest first
pub fn export_expenses_csv<W: Write>(
    storage: &Storage,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    writer: W,
) -> TrackerResult<usize> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(TrackerError::Validation(format!(
                "Export range start {} is after its end {}",
                from, to
            )));
        }
    }

    let filter = ExpenseFilter::new().date_range(from, to);
    let expenses = ExpenseService::new(storage).list_filtered(&filter)?;
    let rows = write_expenses_csv(&expenses, writer)?;

    info!(rows, "exported expenses to CSV");
    Ok(rows)
}

/// Default export file name, e.g. `expenses-2024-01-01_to_2024-01-31-2024-02-03.csv`
///
/// Without any range bound the range part is `all`.
pub fn default_file_name(from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> String {
    let range = match (from, to) {
        (None, None) => "all".to_string(),
        (Some(from), Some(to)) => format!("{}_to_{}", from, to),
        (Some(from), None) => format!("from_{}", from),
        (None, Some(to)) => format!("to_{}", to),
    };
    format!("expenses-{}-{}.csv", range, today)
}
