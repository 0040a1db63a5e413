//! Category service
//!
//! Business logic for category management: find-or-create, renaming,
//! reordering, and deletion with item reassignment to the reserved "None"
//! category.

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, NONE_CATEGORY};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Find a category by exact name, creating it if missing
    ///
    /// New categories receive the next sequential ordering number.
    /// Idempotent: calling twice with the same name returns the same
    /// category.
    pub fn find_or_create(&self, name: &str) -> BudgetResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::Validation("Category name cannot be empty".into()));
        }

        if let Some(existing) = self.storage.categories.get_by_name(name)? {
            return Ok(existing);
        }

        let mut category = Category::new(name);
        category.sort_order = self.storage.categories.max_sort_order()?.map_or(0, |n| n + 1);

        category
            .validate()
            .map_err(BudgetError::Validation)?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
        )?;

        Ok(category)
    }

    /// Get the reserved "None" category, creating it if missing
    pub fn none_category(&self) -> BudgetResult<Category> {
        self.find_or_create(NONE_CATEGORY)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> BudgetResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Get a category by exact name (case-sensitive)
    pub fn get_by_name(&self, name: &str) -> BudgetResult<Option<Category>> {
        self.storage.categories.get_by_name(name)
    }

    /// List all categories: "None" always first, the rest by ordering number
    pub fn list(&self) -> BudgetResult<Vec<Category>> {
        let mut categories = self.storage.categories.get_all()?;
        categories.sort_by_key(|c| (!c.is_none_category(), c.sort_order, c.name.clone()));
        Ok(categories)
    }

    /// Check whether a name is valid for a new category
    ///
    /// Fails for an empty name or an exact-name collision.
    pub fn is_valid_name(&self, name: &str) -> BudgetResult<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        Ok(self.storage.categories.get_by_name(name.trim())?.is_none())
    }

    /// Rename a category in place
    ///
    /// Fails if the new name is empty, collides with a different existing
    /// category, or targets the reserved "None" category.
    pub fn rename(&self, id: CategoryId, new_name: &str) -> BudgetResult<Category> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(BudgetError::Validation("Category name cannot be empty".into()));
        }

        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))?;

        if category.is_none_category() {
            return Err(BudgetError::Validation(
                "The 'None' category cannot be renamed".into(),
            ));
        }

        if let Some(existing) = self.storage.categories.get_by_name(new_name)? {
            if existing.id != id {
                return Err(BudgetError::Duplicate {
                    entity_type: "Category",
                    identifier: new_name.to_string(),
                });
            }
        }

        let old_name = category.name.clone();
        category.name = new_name.to_string();
        category.updated_at = chrono::Utc::now();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            Some(format!("name: '{}' -> '{}'", old_name, category.name)),
        )?;

        Ok(category)
    }

    /// Delete a category
    ///
    /// Every owned item (templates and their monthly instances) is
    /// reassigned to the "None" category first. Deleting "None" itself is a
    /// no-op.
    pub fn delete(&self, id: CategoryId) -> BudgetResult<()> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))?;

        if category.is_none_category() {
            return Ok(());
        }

        let none = self.none_category()?;
        for mut item in self.storage.items.in_category(id)? {
            item.category_id = none.id;
            item.updated_at = chrono::Utc::now();
            self.storage.items.upsert(item)?;
        }

        self.storage.categories.delete(id)?;
        self.storage.items.save()?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
        )?;

        Ok(())
    }

    /// Reassign ordering numbers 0..N-1 by position in the given sequence
    pub fn reorder(&self, order: &[CategoryId]) -> BudgetResult<()> {
        for (i, &id) in order.iter().enumerate() {
            if let Some(mut category) = self.storage.categories.get(id)? {
                category.sort_order = i as i32;
                category.updated_at = chrono::Utc::now();
                self.storage.categories.upsert(category)?;
            }
        }
        self.storage.categories.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::Item;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_find_or_create_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let first = service.find_or_create("Housing").unwrap();
        let second = service.find_or_create("Housing").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(storage.categories.count().unwrap(), 1);
    }

    #[test]
    fn test_find_or_create_is_case_sensitive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let upper = service.find_or_create("Housing").unwrap();
        let lower = service.find_or_create("housing").unwrap();
        assert_ne!(upper.id, lower.id);
    }

    #[test]
    fn test_sort_order_assignment() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let a = service.find_or_create("A").unwrap();
        let b = service.find_or_create("B").unwrap();
        assert_eq!(a.sort_order, 0);
        assert_eq!(b.sort_order, 1);
    }

    #[test]
    fn test_is_valid_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.find_or_create("Housing").unwrap();

        assert!(!service.is_valid_name("").unwrap());
        assert!(!service.is_valid_name("Housing").unwrap());
        assert!(service.is_valid_name("Savings").unwrap());
    }

    #[test]
    fn test_rename_collision_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.find_or_create("Housing").unwrap();
        let other = service.find_or_create("Savings").unwrap();

        let result = service.rename(other.id, "Housing");
        assert!(matches!(result, Err(BudgetError::Duplicate { .. })));
    }

    #[test]
    fn test_delete_reassigns_items_to_none() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.find_or_create("Housing").unwrap();
        let template = Item::new_template("Rent", category.id);
        let template_id = template.id;
        storage.items.upsert(template).unwrap();

        service.delete(category.id).unwrap();

        let none = service.none_category().unwrap();
        let item = storage.items.get(template_id).unwrap().unwrap();
        assert_eq!(item.category_id, none.id);
        assert!(storage.categories.get(category.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_none_is_noop() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let none = service.none_category().unwrap();
        service.delete(none.id).unwrap();
        assert!(storage.categories.get(none.id).unwrap().is_some());
    }

    #[test]
    fn test_list_puts_none_first() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.find_or_create("Housing").unwrap();
        service.find_or_create("Savings").unwrap();
        service.none_category().unwrap();

        let list = service.list().unwrap();
        assert_eq!(list[0].name, NONE_CATEGORY);
    }

    #[test]
    fn test_reorder() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let a = service.find_or_create("A").unwrap();
        let b = service.find_or_create("B").unwrap();
        let c = service.find_or_create("C").unwrap();

        service.reorder(&[c.id, a.id, b.id]).unwrap();

        assert_eq!(storage.categories.get(c.id).unwrap().unwrap().sort_order, 0);
        assert_eq!(storage.categories.get(a.id).unwrap().unwrap().sort_order, 1);
        assert_eq!(storage.categories.get(b.id).unwrap().unwrap().sort_order, 2);
    }
}
