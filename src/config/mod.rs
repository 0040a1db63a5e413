//! Configuration module for budgetbook
//!
//! Provides path resolution and user settings persistence.

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
