//! Storage layer for budgetbook
//!
//! Provides JSON file storage with atomic writes and an in-memory cache per
//! entity family.

pub mod categories;
pub mod file_io;
pub mod init;
pub mod items;
pub mod months;
pub mod payees;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use items::ItemRepository;
pub use months::MonthRepository;
pub use payees::PayeeRepository;
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger, EntityType, Operation};
use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    audit: AuditLogger,
    pub categories: CategoryRepository,
    pub items: ItemRepository,
    pub months: MonthRepository,
    pub payees: PayeeRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            items: ItemRepository::new(paths.items_file()),
            months: MonthRepository::new(paths.months_file()),
            payees: PayeeRepository::new(paths.payees_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BudgetError> {
        self.categories.load()?;
        self.items.load()?;
        self.months.load()?;
        self.payees.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.categories.save()?;
        self.items.save()?;
        self.months.save()?;
        self.payees.save()?;
        self.transactions.save()?;
        Ok(())
    }

    /// Record a create operation in the audit log
    pub fn log_create(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Result<(), BudgetError> {
        self.audit.log(&AuditEntry::new(
            Operation::Create,
            entity_type,
            entity_id,
            entity_name,
            None,
        ))
    }

    /// Record an update operation in the audit log
    pub fn log_update(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        detail: Option<String>,
    ) -> Result<(), BudgetError> {
        self.audit.log(&AuditEntry::new(
            Operation::Update,
            entity_type,
            entity_id,
            entity_name,
            detail,
        ))
    }

    /// Record a delete operation in the audit log
    pub fn log_delete(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Result<(), BudgetError> {
        self.audit.log(&AuditEntry::new(
            Operation::Delete,
            entity_type,
            entity_id,
            entity_name,
            None,
        ))
    }
}
