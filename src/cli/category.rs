//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;
use tracing::debug;

use crate::config::settings::Settings;
use crate::display::budget::format_reconciliation;
use crate::display::category::format_category_list;
use crate::error::{TrackerError, TrackerResult};
use crate::models::MonthKey;
use crate::services::{BudgetReconciler, CategoryService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
    },

    /// Rename a category
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },

    /// Delete a category
    Delete {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> TrackerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
            return Ok(());
        }

        CategoryCommands::Add { name } => {
            if service.add_category(&name)? {
                println!("Added category: {}", name.trim());
            } else {
                println!("Category '{}' already exists.", name.trim());
                return Ok(());
            }
        }

        CategoryCommands::Rename { old, new } => {
            if !service.exists(&old)? {
                return Err(TrackerError::category_not_found(old));
            }
            if service.update_category(&old, &new)? {
                println!("Renamed category: {} -> {}", old, new.trim());
            } else {
                println!("Category name unchanged.");
                return Ok(());
            }
        }

        CategoryCommands::Delete { name } => {
            if !service.delete_category(&name)? {
                return Err(TrackerError::category_not_found(name));
            }
            println!("Deleted category: {}", name);
        }
    }

    if settings.auto_reconcile {
        let month = MonthKey::current();
        let outcome = BudgetReconciler::new(storage).reconcile_month(month)?;
        if outcome.changed() {
            println!("{}", format_reconciliation(&month, &outcome, settings));
        } else {
            debug!(%month, "no budget changes after category update");
        }
    }

    Ok(())
}
