//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod config;
pub mod item;
pub mod month;
pub mod payee;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use item::{handle_item_command, ItemCommands};
pub use month::{handle_month_command, MonthCommands};
pub use payee::{handle_payee_command, PayeeCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
