//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, including
//! the explicit cascade helpers the domain layer uses when items and payees
//! are deleted or merged.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetError;
use crate::models::{ItemId, PayeeId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            transactions: RwLock::new(HashMap::new()),
        }
    }

    fn read_guard(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<TransactionId, Transaction>>, BudgetError> {
        self.transactions
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_guard(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<TransactionId, Transaction>>, BudgetError> {
        self.transactions
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut transactions = self.write_guard()?;
        transactions.clear();
        for transaction in file_data.transactions {
            transactions.insert(transaction.id, transaction);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let transactions = self.read_guard()?;

        let mut list: Vec<_> = transactions.values().cloned().collect();
        list.sort_by_key(|t| (t.date, t.created_at));

        write_json_atomic(&self.path, &TransactionData { transactions: list })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, BudgetError> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// Get all transactions, ascending by date
    pub fn get_all(&self) -> Result<Vec<Transaction>, BudgetError> {
        let transactions = self.read_guard()?;
        let mut list: Vec<_> = transactions.values().cloned().collect();
        list.sort_by_key(|t| (t.date, t.created_at));
        Ok(list)
    }

    /// Get transactions recorded against an item, ascending by date
    pub fn for_item(&self, item_id: ItemId) -> Result<Vec<Transaction>, BudgetError> {
        let transactions = self.read_guard()?;
        let mut list: Vec<_> = transactions
            .values()
            .filter(|t| t.item_id == item_id)
            .cloned()
            .collect();
        list.sort_by_key(|t| (t.date, t.created_at));
        Ok(list)
    }

    /// Get transactions belonging to a payee, ascending by date
    pub fn for_payee(&self, payee_id: PayeeId) -> Result<Vec<Transaction>, BudgetError> {
        let transactions = self.read_guard()?;
        let mut list: Vec<_> = transactions
            .values()
            .filter(|t| t.payee_id == payee_id)
            .cloned()
            .collect();
        list.sort_by_key(|t| (t.date, t.created_at));
        Ok(list)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, transaction: Transaction) -> Result<(), BudgetError> {
        self.write_guard()?.insert(transaction.id, transaction);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, BudgetError> {
        Ok(self.write_guard()?.remove(&id).is_some())
    }

    /// Delete all transactions recorded against an item (item-delete cascade)
    pub fn delete_for_item(&self, item_id: ItemId) -> Result<usize, BudgetError> {
        let mut transactions = self.write_guard()?;
        let before = transactions.len();
        transactions.retain(|_, t| t.item_id != item_id);
        Ok(before - transactions.len())
    }

    /// Delete all transactions belonging to a payee (payee-delete cascade)
    pub fn delete_for_payee(&self, payee_id: PayeeId) -> Result<usize, BudgetError> {
        let mut transactions = self.write_guard()?;
        let before = transactions.len();
        transactions.retain(|_, t| t.payee_id != payee_id);
        Ok(before - transactions.len())
    }

    /// Move every transaction of one payee onto another (payee merge)
    pub fn reassign_payee(&self, from: PayeeId, to: PayeeId) -> Result<usize, BudgetError> {
        let mut transactions = self.write_guard()?;
        let mut moved = 0;
        for transaction in transactions.values_mut() {
            if transaction.payee_id == from {
                transaction.payee_id = to;
                transaction.updated_at = chrono::Utc::now();
                moved += 1;
            }
        }
        Ok(moved)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read_guard()?.len())
    }
}
