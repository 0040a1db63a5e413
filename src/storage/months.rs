//! Month repository for JSON storage
//!
//! Manages loading and saving calendar months to months.json. Months are
//! unique by (year, month) and are never deleted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetError;
use crate::models::{Month, MonthId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable month file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MonthData {
    months: Vec<Month>,
}

/// Repository for month persistence
pub struct MonthRepository {
    path: PathBuf,
    months: RwLock<HashMap<MonthId, Month>>,
}

impl MonthRepository {
    /// Create a new month repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            months: RwLock::new(HashMap::new()),
        }
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, HashMap<MonthId, Month>>, BudgetError> {
        self.months
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, HashMap<MonthId, Month>>, BudgetError> {
        self.months
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load months from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: MonthData = read_json(&self.path)?;

        let mut months = self.write_guard()?;
        months.clear();
        for month in file_data.months {
            months.insert(month.id, month);
        }

        Ok(())
    }

    /// Save months to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let months = self.read_guard()?;

        let mut list: Vec<_> = months.values().cloned().collect();
        list.sort_by_key(|m| (m.year, m.month));

        write_json_atomic(&self.path, &MonthData { months: list })
    }

    /// Get a month by ID
    pub fn get(&self, id: MonthId) -> Result<Option<Month>, BudgetError> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// Get a month by its (year, month) pair
    pub fn get_by_year_month(&self, year: i32, month: u32) -> Result<Option<Month>, BudgetError> {
        let months = self.read_guard()?;
        Ok(months
            .values()
            .find(|m| m.year == year && m.month == month)
            .cloned())
    }

    /// Get all months, ascending by calendar date
    pub fn get_all(&self) -> Result<Vec<Month>, BudgetError> {
        let months = self.read_guard()?;
        let mut list: Vec<_> = months.values().cloned().collect();
        list.sort_by_key(|m| (m.year, m.month));
        Ok(list)
    }

    /// Insert or update a month
    pub fn upsert(&self, month: Month) -> Result<(), BudgetError> {
        self.write_guard()?.insert(month.id, month);
        Ok(())
    }

    /// Count months
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read_guard()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, MonthRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = MonthRepository::new(temp_dir.path().join("months.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_get_by_year_month() {
        let (_temp_dir, repo) = create_test_repo();

        let month = Month::new(2024, 1);
        repo.upsert(month.clone()).unwrap();

        let found = repo.get_by_year_month(2024, 1).unwrap().unwrap();
        assert_eq!(found.id, month.id);
        assert!(repo.get_by_year_month(2024, 2).unwrap().is_none());
    }

    #[test]
    fn test_get_all_ascending() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert(Month::new(2024, 3)).unwrap();
        repo.upsert(Month::new(2023, 12)).unwrap();
        repo.upsert(Month::new(2024, 1)).unwrap();

        let all = repo.get_all().unwrap();
        let pairs: Vec<_> = all.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(pairs, vec![(2023, 12), (2024, 1), (2024, 3)]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(Month::new(2024, 6)).unwrap();
        repo.save().unwrap();

        let repo2 = MonthRepository::new(temp_dir.path().join("months.json"));
        repo2.load().unwrap();
        assert!(repo2.get_by_year_month(2024, 6).unwrap().is_some());
    }
}
