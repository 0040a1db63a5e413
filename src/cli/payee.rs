//! Payee CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::payee::{format_payee_details, format_payee_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::Payee;
use crate::services::PayeeService;
use crate::storage::Storage;

/// Payee subcommands
#[derive(Subcommand)]
pub enum PayeeCommands {
    /// List all payees
    List,

    /// Show payee details with lifetime spending
    Show {
        /// Payee name or ID
        payee: String,
    },

    /// Rename a payee, merging with an existing payee of the same name
    Rename {
        /// Payee name or ID
        payee: String,
        /// New name
        name: String,
    },

    /// Delete a payee and all of its transactions
    Delete {
        /// Payee name or ID
        payee: String,
    },
}

/// Resolve a payee argument by name (case-insensitive) or ID
fn find_payee(service: &PayeeService, arg: &str) -> BudgetResult<Payee> {
    if let Some(payee) = service.get_by_name(arg)? {
        return Ok(payee);
    }
    if let Ok(id) = arg.parse() {
        if let Some(payee) = service.get(id)? {
            return Ok(payee);
        }
    }
    Err(BudgetError::payee_not_found(arg))
}

/// Handle a payee command
pub fn handle_payee_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PayeeCommands,
) -> BudgetResult<()> {
    let service = PayeeService::new(storage);

    match cmd {
        PayeeCommands::List => {
            let payees = service.list()?;
            print!("{}", format_payee_list(&payees));
        }

        PayeeCommands::Show { payee } => {
            let payee = find_payee(&service, &payee)?;
            let transactions = service.transactions_from(payee.id, None, None)?;
            let total = service.total_spent(payee.id, None, None)?;
            print!(
                "{}",
                format_payee_details(
                    &payee,
                    total,
                    transactions.len(),
                    &settings.currency_symbol
                )
            );
        }

        PayeeCommands::Rename { payee, name } => {
            let payee = find_payee(&service, &payee)?;
            let renamed = service.rename(payee.id, &name)?;
            println!("Renamed payee: {}", renamed.name);
        }

        PayeeCommands::Delete { payee } => {
            let payee = find_payee(&service, &payee)?;
            service.delete(payee.id)?;
            println!("Deleted payee: {}", payee.name);
        }
    }

    Ok(())
}
