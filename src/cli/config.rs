//! Configuration CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::BudgetResult;
use crate::storage::Storage;

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and data locations
    Show,

    /// Change display settings
    Set {
        /// Currency symbol used for display
        #[arg(long)]
        currency: Option<String>,
        /// Date format (strftime), e.g. "%Y-%m-%d"
        #[arg(long)]
        date_format: Option<String>,
    },
}

/// Handle a configuration command
pub fn handle_config_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> BudgetResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Data directory: {}", storage.paths().data_dir().display());
            println!("Audit log:      {}", storage.paths().audit_log().display());
            println!();
            println!("Currency symbol: {}", settings.currency_symbol);
            println!("Date format:     {}", settings.date_format);
        }

        ConfigCommands::Set {
            currency,
            date_format,
        } => {
            if currency.is_none() && date_format.is_none() {
                println!("No changes specified. Use --currency or --date-format.");
                return Ok(());
            }

            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(date_format) = date_format {
                settings.date_format = date_format;
            }

            settings.save(storage.paths())?;
            println!("Settings saved.");
        }
    }

    Ok(())
}
