//! Month CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::month::{format_month_list, format_month_summary, LineSummary};
use crate::error::{BudgetError, BudgetResult};
use crate::services::{ItemService, MonthService};
use crate::storage::Storage;

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show the budget summary for a month
    Show {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<String>,
    },

    /// List all months
    List,
}

/// Handle a month command
pub fn handle_month_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MonthCommands,
) -> BudgetResult<()> {
    let service = MonthService::new(storage);

    match cmd {
        MonthCommands::Show { month } => {
            let month = match month {
                Some(s) => {
                    let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
                        .map_err(|_| {
                            BudgetError::Validation(format!(
                                "Invalid month '{}', expected YYYY-MM",
                                s
                            ))
                        })?;
                    service.find_or_create(date)?
                }
                None => service.current()?,
            };

            let items = ItemService::new(storage);
            let mut lines = Vec::new();
            for instance in storage.items.in_month(month.id)? {
                let category = storage
                    .categories
                    .get(instance.category_id)?
                    .map_or_else(String::new, |c| c.name);
                let spent = items.total_spent(instance.id)?;
                lines.push(LineSummary {
                    category,
                    name: instance.name.clone(),
                    budgeted: instance.amount,
                    spent,
                    remaining: instance.amount - spent,
                });
            }
            lines.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));

            let budgeted = service.total_budgeted(month.id)?;
            let spent = service.total_spent(month.id)?;
            let balance = service.total_balance(month.id)?;

            print!(
                "{}",
                format_month_summary(
                    &month,
                    &lines,
                    budgeted,
                    spent,
                    balance,
                    &settings.currency_symbol
                )
            );
        }

        MonthCommands::List => {
            let months = service.list()?;
            let today = chrono::Local::now().date_naive();
            let current = months.iter().find(|m| m.contains(today)).cloned();
            print!("{}", format_month_list(&months, current.as_ref()));
        }
    }

    Ok(())
}
