use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetbook::cli::{
    handle_category_command, handle_config_command, handle_item_command, handle_month_command,
    handle_payee_command, handle_transaction_command, CategoryCommands, ConfigCommands,
    ItemCommands, MonthCommands, PayeeCommands, TransactionCommands,
};
use budgetbook::config::{paths::BudgetPaths, settings::Settings};
use budgetbook::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "budgetbook",
    version,
    about = "Terminal-based personal monthly budgeting",
    long_about = "budgetbook tracks recurring budget lines grouped by category. \
                  Each calendar month carries its own copy of every line with its \
                  own budgeted amount, and transactions are recorded against a \
                  month's lines."
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

    /// Budget line management commands
    #[command(subcommand)]
    Item(ItemCommands),

    /// Month summaries
    #[command(subcommand)]
    Month(MonthCommands),

    /// Payee management commands
    #[command(subcommand)]
    Payee(PayeeCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize a new budget with starter categories and budget lines
    Init,

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths)?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Item(cmd)) => {
            handle_item_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Month(cmd)) => {
            handle_month_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Payee(cmd)) => {
            handle_payee_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries found.");
            }
            for entry in entries {
                let name = entry.entity_name.as_deref().unwrap_or("");
                let detail = entry
                    .detail
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default();
                println!(
                    "{}  {:6}  {:<11}  {}{}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.operation.to_string(),
                    entry.entity_type.to_string(),
                    name,
                    detail
                );
            }
        }
        Some(Commands::Init) => {
            println!(
                "Initializing budgetbook at: {}",
                storage.paths().data_dir().display()
            );
            initialize_storage(&storage)?;
            settings.save(storage.paths())?;
            println!("Initialization complete!");
            println!();
            println!("Default categories and budget lines have been created:");
            println!("  - Monthly Expenses (Housing, Utilities, Online Services, Insurance)");
            println!("  - Daily Expenses (Groceries, Personal Care, Home Goods, Spending Money)");
            println!("  - Transportation (Car Payment, Insurance, Gas, Maintenance)");
            println!("  - Savings (Investing, Debt Payoff)");
            println!();
            println!("Run 'budgetbook item list' to see all budget lines.");
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&storage, &mut settings, cmd)?;
        }
        None => {
            println!("budgetbook - Terminal-based personal monthly budgeting");
            println!();
            println!("Run 'budgetbook --help' for usage information.");
            println!("Run 'budgetbook init' to set up a new budget.");
        }
    }

    Ok(())
}
