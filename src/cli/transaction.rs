//! Transaction CLI commands
//!
//! Dates are parsed with the configured date format. The budget line and
//! payee are resolved by name; the month containing the date is materialized
//! automatically.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{
    format_transaction_details, format_transaction_register, TransactionView,
};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, Transaction, TransactionId};
use crate::services::{MonthService, PayeeService, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Budget line name
        item: String,
        /// Payee name (created if missing)
        payee: String,
        /// Amount (e.g., "45.99")
        amount: String,
        /// Memo text
        #[arg(short, long, default_value = "")]
        memo: String,
        /// Transaction date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
    },

    /// List transactions
    List {
        /// Restrict to a month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Restrict to a payee
        #[arg(short, long)]
        payee: Option<String>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        transaction: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        transaction: String,
        /// New budget line name
        #[arg(short, long)]
        item: Option<String>,
        /// New payee name
        #[arg(short, long)]
        payee: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New memo
        #[arg(short, long)]
        memo: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        transaction: String,
    },
}

/// Resolve a transaction argument by short display ID or full UUID
fn find_transaction(storage: &Storage, arg: &str) -> BudgetResult<Transaction> {
    if let Ok(id) = arg.parse::<TransactionId>() {
        if let Some(transaction) = storage.transactions.get(id)? {
            return Ok(transaction);
        }
    }
    for transaction in storage.transactions.get_all()? {
        if transaction.id.to_string() == arg {
            return Ok(transaction);
        }
    }
    Err(BudgetError::transaction_not_found(arg))
}

fn parse_date(arg: &str, settings: &Settings) -> BudgetResult<NaiveDate> {
    NaiveDate::parse_from_str(arg, &settings.date_format).map_err(|_| {
        BudgetError::Validation(format!(
            "Invalid date '{}', expected {}",
            arg, settings.date_format
        ))
    })
}

fn parse_amount(arg: &str) -> BudgetResult<Money> {
    Money::parse(arg).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

/// Join a transaction with its display names
fn view_of(storage: &Storage, transaction: Transaction) -> BudgetResult<TransactionView> {
    let payee_name = storage
        .payees
        .get(transaction.payee_id)?
        .map_or_else(String::new, |p| p.name);
    let item_name = storage
        .items
        .get(transaction.item_id)?
        .map_or_else(String::new, |i| i.name);
    Ok(TransactionView {
        transaction,
        payee_name,
        item_name,
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            item,
            payee,
            amount,
            memo,
            date,
            income,
        } => {
            let template = super::item::find_template(storage, &item)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date(&d, settings)?,
                None => chrono::Local::now().date_naive(),
            };

            let transaction =
                service.create(template.id, &payee, amount, &memo, date, !income)?;

            println!(
                "Recorded {} at {} on {}",
                transaction.amount.format_with_symbol(&settings.currency_symbol),
                payee.trim(),
                transaction.date.format("%Y-%m-%d")
            );
        }

        TransactionCommands::List { month, payee } => {
            let mut transactions = match month {
                Some(s) => {
                    let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
                        .map_err(|_| {
                            BudgetError::Validation(format!(
                                "Invalid month '{}', expected YYYY-MM",
                                s
                            ))
                        })?;
                    let month = MonthService::new(storage).find_or_create(date)?;
                    service.list_for_month(&month)?
                }
                None => service.list()?,
            };

            if let Some(name) = payee {
                let payee = PayeeService::new(storage)
                    .get_by_name(&name)?
                    .ok_or_else(|| BudgetError::payee_not_found(&name))?;
                transactions.retain(|t| t.payee_id == payee.id);
            }

            let mut views = Vec::with_capacity(transactions.len());
            for transaction in transactions {
                views.push(view_of(storage, transaction)?);
            }
            println!(
                "{}",
                format_transaction_register(&views, &settings.currency_symbol)
            );
        }

        TransactionCommands::Show { transaction } => {
            let transaction = find_transaction(storage, &transaction)?;
            let view = view_of(storage, transaction)?;
            print!(
                "{}",
                format_transaction_details(&view, &settings.currency_symbol)
            );
        }

        TransactionCommands::Edit {
            transaction,
            item,
            payee,
            amount,
            memo,
            date,
        } => {
            let transaction = find_transaction(storage, &transaction)?;

            let item_id = match item {
                Some(name) => Some(super::item::find_template(storage, &name)?.id),
                None => None,
            };
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let date = date
                .as_deref()
                .map(|d| parse_date(d, settings))
                .transpose()?;

            service.edit(
                transaction.id,
                item_id,
                payee.as_deref(),
                amount,
                memo.as_deref(),
                date,
                None,
            )?;
            println!("Updated transaction: {}", transaction.id);
        }

        TransactionCommands::Delete { transaction } => {
            let transaction = find_transaction(storage, &transaction)?;
            service.delete(transaction.id)?;
            println!("Deleted transaction: {}", transaction.id);
        }
    }

    Ok(())
}
