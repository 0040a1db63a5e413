//! Service layer for budgetbook
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, seeding, propagation, cascades, and cross-entity
//! operations.

pub mod category;
pub mod item;
pub mod month;
pub mod payee;
pub mod transaction;

pub use category::CategoryService;
pub use item::ItemService;
pub use month::MonthService;
pub use payee::PayeeService;
pub use transaction::TransactionService;
