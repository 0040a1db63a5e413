//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables, trees, and detail views.

pub mod category;
pub mod item;
pub mod month;
pub mod payee;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use item::{format_item_details, format_item_tree, CategoryWithItems};
pub use month::{format_month_list, format_month_summary, LineSummary};
pub use payee::{format_payee_details, format_payee_list};
pub use transaction::{format_transaction_details, format_transaction_register, TransactionView};
