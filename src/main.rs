use anyhow::Result;
use clap::{Parser, Subcommand};

use pennywise::cli::{
    handle_budget_command, handle_category_command, handle_expense_command, BudgetCommands,
    CategoryCommands, ExpenseCommands,
};
use pennywise::config::{paths::TrackerPaths, settings::Settings};
use pennywise::logging::init_tracing;
use pennywise::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pennywise",
    version,
    about = "Local-first personal expense tracker",
    long_about = "Pennywise tracks expenses against monthly category budgets. \
                  Split a monthly total evenly across your categories and the \
                  budget rebalances itself as categories come and go."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("Pennywise Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Auto reconcile:  {}", settings.auto_reconcile);
            println!("  Log filter:      {}", settings.log_filter);
        }
        None => {
            println!("Pennywise - local-first expense tracker");
            println!();
            println!("Run 'pennywise --help' for usage information.");
            println!("Run 'pennywise budget show' to see this month's budget.");
        }
    }

    Ok(())
}
