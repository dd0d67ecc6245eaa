//! Budget CLI commands
//!
//! Implements CLI commands for monthly budgets: overview, manual amounts,
//! equal distribution and reconciliation.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::budget::{format_drift, format_month_list, format_reconciliation};
use crate::error::TrackerResult;
use crate::models::MonthKey;
use crate::reports::BudgetOverviewReport;
use crate::services::{BudgetReconciler, BudgetService, CategoryService};
use crate::storage::Storage;

use super::parse_month;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budget vs. spending for a month
    Show {
        /// Month ("current", "last", "next", or a key like 2024-00 for January 2024)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set the budget for one category
    Set {
        /// Category name
        category: String,
        /// Amount (e.g., "100" or "100.50")
        amount: f64,
        /// Month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Clear the budget for one category
    Clear {
        /// Category name
        category: String,
        /// Month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Split a total evenly across all categories
    Distribute {
        /// Total amount to distribute
        total: f64,
        /// Month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Bring budgets in line with the current category list
    Reconcile {
        /// Month
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// Reconcile every month that has a budget
        #[arg(long)]
        all: bool,
    },

    /// List recent months
    Months {
        /// Number of months to show
        #[arg(short, long, default_value = "12")]
        count: usize,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let service = BudgetService::new(storage);
    let reconciler = BudgetReconciler::new(storage);

    match cmd {
        BudgetCommands::Show { month } => {
            let month = parse_month(month.as_deref())?;
            let outcome = reconciler.reconcile_month(month)?;
            if outcome.changed() {
                println!("{}\n", format_reconciliation(&month, &outcome, settings));
            }

            let report = BudgetOverviewReport::generate(storage, &month)?;
            print!("{}", report.format_terminal(settings));
        }

        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let month = parse_month(month.as_deref())?;
            service.set_category_budget(month, &category, amount)?;
            println!(
                "Budgeted {} for {} in {}",
                settings.format_amount(amount),
                category,
                month.label()
            );

            if !CategoryService::new(storage).exists(&category)? {
                println!("Note: '{}' is not in the category list.", category);
            }
        }

        BudgetCommands::Clear { category, month } => {
            let month = parse_month(month.as_deref())?;
            service.clear_category_budget(month, &category)?;
            println!("Cleared budget for {} in {}", category, month.label());
        }

        BudgetCommands::Distribute { total, month } => {
            let month = parse_month(month.as_deref())?;
            let categories = CategoryService::new(storage).names()?;

            if service.distribute_budget_equally(month, total, &categories)? {
                let share = total / categories.len() as f64;
                println!(
                    "Distributed {} across {} categories ({} each) for {}",
                    settings.format_amount(total),
                    categories.len(),
                    settings.format_amount(share),
                    month.label()
                );
            } else {
                println!("No categories to distribute over. Add one with 'pennywise category add'.");
            }
        }

        BudgetCommands::Reconcile { month, all } => {
            if all {
                let changed = reconciler.reconcile_all()?;
                if changed.is_empty() {
                    println!("All budgets match the category list.");
                } else {
                    for month in changed {
                        println!("Reconciled {}", month.label());
                    }
                }
            } else {
                let month = parse_month(month.as_deref())?;
                let drift = reconciler.drift(&month)?;
                if !drift.is_empty() {
                    println!("Drift: {}", format_drift(&drift));
                }
                let outcome = reconciler.reconcile_month(month)?;
                println!("{}", format_reconciliation(&month, &outcome, settings));
            }
        }

        BudgetCommands::Months { count } => {
            let current = MonthKey::current();
            let months = MonthKey::recent(count);
            let budgeted = service.months()?;
            print!("{}", format_month_list(&months, &budgeted, current));
        }
    }

    Ok(())
}
