//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, HashMap<CategoryId, Category>>, BudgetError> {
        self.categories
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_guard(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<CategoryId, Category>>, BudgetError> {
        self.categories
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.write_guard()?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let categories = self.read_guard()?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by_key(|c| (c.sort_order, c.name.clone()));

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, BudgetError> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// Get all categories, sorted by ordering number
    pub fn get_all(&self) -> Result<Vec<Category>, BudgetError> {
        let categories = self.read_guard()?;
        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by_key(|c| (c.sort_order, c.name.clone()));
        Ok(list)
    }

    /// Get a category by exact name (case-sensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, BudgetError> {
        let categories = self.read_guard()?;
        Ok(categories.values().find(|c| c.name == name).cloned())
    }

    /// Highest ordering number currently assigned, if any category exists
    pub fn max_sort_order(&self) -> Result<Option<i32>, BudgetError> {
        let categories = self.read_guard()?;
        Ok(categories.values().map(|c| c.sort_order).max())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), BudgetError> {
        self.write_guard()?.insert(category.id, category);
        Ok(())
    }

    /// Delete a category
    pub fn delete(&self, id: CategoryId) -> Result<bool, BudgetError> {
        Ok(self.write_guard()?.remove(&id).is_some())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read_guard()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path);
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        let category = Category::new("Housing");
        let id = category.id;
        repo.upsert(category).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Housing");

        repo.delete(id).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_by_name_is_case_sensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Category::new("Housing")).unwrap();

        assert!(repo.get_by_name("Housing").unwrap().is_some());
        assert!(repo.get_by_name("housing").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        let category = Category::new("Savings");
        let id = category.id;
        repo.upsert(category).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();

        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Savings");
    }

    #[test]
    fn test_max_sort_order() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.max_sort_order().unwrap(), None);

        let mut a = Category::new("A");
        a.sort_order = 2;
        let mut b = Category::new("B");
        b.sort_order = 5;
        repo.upsert(a).unwrap();
        repo.upsert(b).unwrap();

        assert_eq!(repo.max_sort_order().unwrap(), Some(5));
    }
}
