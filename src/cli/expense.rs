//! Expense CLI commands
//!
//! Implements CLI commands for recording, editing, listing, summarising and
//! exporting expenses.

use std::fs::File;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_register};
use crate::error::{TrackerError, TrackerResult};
use crate::export::{default_file_name, export_expenses_csv};
use crate::models::ExpenseData;
use crate::reports::{DailySpendingReport, SpendingReport, DEFAULT_TOP_CATEGORIES};
use crate::services::{ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::parse_month;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount spent (e.g., "12.50")
        amount: f64,
        /// Category name
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List expenses, newest first
    ///
    /// Without --month, a date filter searches every month.
    List {
        /// Month ("current", "last", "next", or a key like 2024-00)
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// List every month
        #[arg(long)]
        all: bool,
        /// Only expenses on this date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        date: Option<NaiveDate>,
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one expense
    Show {
        /// Expense ID (or its first characters)
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (or its first characters)
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<f64>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// New note
        #[arg(short, long, conflicts_with = "clear_note")]
        note: Option<String>,
        /// Remove the note
        #[arg(long)]
        clear_note: bool,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (or its first characters)
        id: String,
    },

    /// Show the categories with the highest spending
    Summary {
        /// Month
        #[arg(short, long)]
        month: Option<String>,
        /// Number of categories to show
        #[arg(short, long, default_value_t = DEFAULT_TOP_CATEGORIES)]
        top: usize,
    },

    /// Show spending per day
    Daily {
        /// Month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export expenses to CSV
    Export {
        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output file, defaults to the exports directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            note,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut data = ExpenseData::new(amount, date, category);
            data.note = note;

            let expense = service.add(data)?;
            println!(
                "Recorded {} for {} on {} ({})",
                settings.format_amount(expense.amount),
                expense.category,
                expense.date.format(&settings.date_format),
                expense.id.short()
            );
        }

        ExpenseCommands::List {
            month,
            all,
            date,
            from,
            to,
            category,
            limit,
        } => {
            let mut filter = match date {
                Some(date) => ExpenseFilter::new().on(date),
                None => ExpenseFilter::new().date_range(from, to),
            };
            if let (Some(from), Some(to)) = (filter.from, filter.to) {
                if from > to {
                    return Err(TrackerError::Validation(format!(
                        "Start date {} is after end date {}",
                        from, to
                    )));
                }
            }
            if month.is_some() || !(all || filter.has_dates()) {
                filter = filter.month(parse_month(month.as_deref())?);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let expenses = service.list_filtered(&filter)?;
            print!("{}", format_expense_register(&expenses, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find(&id)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
            note,
            clear_note,
        } => {
            let expense = service.find(&id)?;
            let mut data = expense.data();

            if let Some(amount) = amount {
                data.amount = amount;
            }
            if let Some(category) = category {
                data.category = category;
            }
            if let Some(date) = date {
                data.date = date;
            }
            if clear_note {
                data.note = None;
            } else if note.is_some() {
                data.note = note;
            }

            let updated = service.update(expense.id, data)?;
            println!("Updated expense {}", updated.id.short());
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.find(&id)?;
            service.delete(expense.id)?;
            println!("Deleted expense {} ({})", expense.id.short(), expense);
        }

        ExpenseCommands::Summary { month, top } => {
            let month = parse_month(month.as_deref())?;
            let report = SpendingReport::generate(storage, &month, Some(top))?;
            println!("{}", month.label());
            print!("{}", report.format_terminal(settings));
        }

        ExpenseCommands::Daily { month } => {
            let month = parse_month(month.as_deref())?;
            let report = DailySpendingReport::generate(storage, &month)?;
            println!("{}", month.label());
            print!("{}", report.format_terminal(settings));
        }

        ExpenseCommands::Export { from, to, output } => {
            let path = match output {
                Some(path) => path,
                None => {
                    let today = Local::now().date_naive();
                    let dir = storage
                        .paths()
                        .map(|p| p.export_dir())
                        .unwrap_or_else(|| PathBuf::from("."));
                    std::fs::create_dir_all(&dir).map_err(|e| {
                        TrackerError::Export(format!(
                            "Failed to create export directory {}: {}",
                            dir.display(),
                            e
                        ))
                    })?;
                    dir.join(default_file_name(from, to, today))
                }
            };

            let file = File::create(&path).map_err(|e| {
                TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let rows = export_expenses_csv(storage, from, to, file)?;
            println!("Exported {} expense(s) to {}", rows, path.display());
        }
    }

    Ok(())
}
