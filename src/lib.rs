//! budgetbook - Terminal-based personal monthly budgeting
//!
//! This library provides the core functionality for the budgetbook
//! application. Budgets are organized as recurring budget lines grouped by
//! category; each calendar month carries its own instance of every line with
//! its own amount, and transactions are recorded against those monthly
//! instances.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, items, months, payees, transactions)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::BudgetError;
