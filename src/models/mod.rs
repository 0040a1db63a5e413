//! Core data models for budgetbook
//!
//! This module contains the data structures that represent the budgeting
//! domain: categories, template/monthly items, months, payees, and
//! transactions.

pub mod category;
pub mod ids;
pub mod item;
pub mod money;
pub mod month;
pub mod payee;
pub mod transaction;

pub use category::{Category, NONE_CATEGORY};
pub use ids::{CategoryId, ItemId, MonthId, PayeeId, TransactionId};
pub use item::{Item, ItemRole};
pub use money::Money;
pub use month::Month;
pub use payee::Payee;
pub use transaction::Transaction;
