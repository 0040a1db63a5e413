//! Payee repository for JSON storage
//!
//! Manages loading and saving payees to payees.json. Name lookups are
//! case-insensitive.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetError;
use crate::models::{Payee, PayeeId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable payee file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PayeeData {
    payees: Vec<Payee>,
}

/// Repository for payee persistence
pub struct PayeeRepository {
    path: PathBuf,
    payees: RwLock<HashMap<PayeeId, Payee>>,
}

impl PayeeRepository {
    /// Create a new payee repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            payees: RwLock::new(HashMap::new()),
        }
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, HashMap<PayeeId, Payee>>, BudgetError> {
        self.payees
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, HashMap<PayeeId, Payee>>, BudgetError> {
        self.payees
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load payees from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: PayeeData = read_json(&self.path)?;

        let mut payees = self.write_guard()?;
        payees.clear();
        for payee in file_data.payees {
            payees.insert(payee.id, payee);
        }

        Ok(())
    }

    /// Save payees to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let payees = self.read_guard()?;

        let mut list: Vec<_> = payees.values().cloned().collect();
        list.sort_by_key(|p| p.name.to_lowercase());

        write_json_atomic(&self.path, &PayeeData { payees: list })
    }

    /// Get a payee by ID
    pub fn get(&self, id: PayeeId) -> Result<Option<Payee>, BudgetError> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// Get a payee by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Payee>, BudgetError> {
        let payees = self.read_guard()?;
        Ok(payees.values().find(|p| p.matches_name(name)).cloned())
    }

    /// Get all payees, sorted by name
    pub fn get_all(&self) -> Result<Vec<Payee>, BudgetError> {
        let payees = self.read_guard()?;
        let mut list: Vec<_> = payees.values().cloned().collect();
        list.sort_by_key(|p| p.name.to_lowercase());
        Ok(list)
    }

    /// Insert or update a payee
    pub fn upsert(&self, payee: Payee) -> Result<(), BudgetError> {
        self.write_guard()?.insert(payee.id, payee);
        Ok(())
    }

    /// Delete a payee
    pub fn delete(&self, id: PayeeId) -> Result<bool, BudgetError> {
        Ok(self.write_guard()?.remove(&id).is_some())
    }

    /// Count payees
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read_guard()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PayeeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = PayeeRepository::new(temp_dir.path().join("payees.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_get_by_name_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Payee::new("Grocery Store")).unwrap();

        assert!(repo.get_by_name("grocery store").unwrap().is_some());
        assert!(repo.get_by_name("GROCERY STORE").unwrap().is_some());
        assert!(repo.get_by_name("Gas Station").unwrap().is_none());
    }

    #[test]
    fn test_get_all_sorted() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Payee::new("zeta")).unwrap();
        repo.upsert(Payee::new("Alpha")).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].name, "Alpha");
        assert_eq!(all[1].name, "zeta");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let payee = Payee::new("Landlord");
        let id = payee.id;
        repo.upsert(payee).unwrap();
        repo.save().unwrap();

        let repo2 = PayeeRepository::new(temp_dir.path().join("payees.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().name, "Landlord");
    }
}
