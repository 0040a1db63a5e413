//! Audit logging for budgetbook
//!
//! Records every create, update, and delete operation in an append-only
//! line-delimited JSON log.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
