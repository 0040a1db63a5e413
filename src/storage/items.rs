//! Item repository for JSON storage
//!
//! Manages loading and saving budget items (templates and monthly instances)
//! to items.json. The month-to-instance join is by template identity, never
//! by name.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetError;
use crate::models::{CategoryId, Item, ItemId, MonthId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable item file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ItemData {
    items: Vec<Item>,
}

/// Repository for item persistence
pub struct ItemRepository {
    path: PathBuf,
    items: RwLock<HashMap<ItemId, Item>>,
}

impl ItemRepository {
    /// Create a new item repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            items: RwLock::new(HashMap::new()),
        }
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, HashMap<ItemId, Item>>, BudgetError> {
        self.items
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, HashMap<ItemId, Item>>, BudgetError> {
        self.items
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load items from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: ItemData = read_json(&self.path)?;

        let mut items = self.write_guard()?;
        items.clear();
        for item in file_data.items {
            items.insert(item.id, item);
        }

        Ok(())
    }

    /// Save items to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let items = self.read_guard()?;

        let mut list: Vec<_> = items.values().cloned().collect();
        list.sort_by_key(|i| (i.sort_order, i.name.clone()));

        write_json_atomic(&self.path, &ItemData { items: list })
    }

    /// Get an item by ID
    pub fn get(&self, id: ItemId) -> Result<Option<Item>, BudgetError> {
        Ok(self.read_guard()?.get(&id).cloned())
    }

    /// Get all items
    pub fn get_all(&self) -> Result<Vec<Item>, BudgetError> {
        let items = self.read_guard()?;
        let mut list: Vec<_> = items.values().cloned().collect();
        list.sort_by_key(|i| (i.sort_order, i.name.clone()));
        Ok(list)
    }

    /// Get all template items, sorted by ordering number
    pub fn templates(&self) -> Result<Vec<Item>, BudgetError> {
        let items = self.read_guard()?;
        let mut list: Vec<_> = items.values().filter(|i| i.is_template()).cloned().collect();
        list.sort_by_key(|i| (i.sort_order, i.name.clone()));
        Ok(list)
    }

    /// Get template items belonging to a category
    pub fn templates_in_category(&self, category_id: CategoryId) -> Result<Vec<Item>, BudgetError> {
        let items = self.read_guard()?;
        let mut list: Vec<_> = items
            .values()
            .filter(|i| i.is_template() && i.category_id == category_id)
            .cloned()
            .collect();
        list.sort_by_key(|i| (i.sort_order, i.name.clone()));
        Ok(list)
    }

    /// Get all items owned by a category, templates and instances alike
    pub fn in_category(&self, category_id: CategoryId) -> Result<Vec<Item>, BudgetError> {
        let items = self.read_guard()?;
        Ok(items
            .values()
            .filter(|i| i.category_id == category_id)
            .cloned()
            .collect())
    }

    /// Get all monthly instances of a template
    pub fn instances_of(&self, template_id: ItemId) -> Result<Vec<Item>, BudgetError> {
        let items = self.read_guard()?;
        Ok(items
            .values()
            .filter(|i| i.template_id() == Some(template_id))
            .cloned()
            .collect())
    }

    /// Get all instances belonging to a month
    pub fn in_month(&self, month_id: MonthId) -> Result<Vec<Item>, BudgetError> {
        let items = self.read_guard()?;
        let mut list: Vec<_> = items
            .values()
            .filter(|i| i.month_id() == Some(month_id))
            .cloned()
            .collect();
        list.sort_by_key(|i| (i.sort_order, i.name.clone()));
        Ok(list)
    }

    /// Get a month's instance of a given template (identity join)
    pub fn instance_for(
        &self,
        month_id: MonthId,
        template_id: ItemId,
    ) -> Result<Option<Item>, BudgetError> {
        let items = self.read_guard()?;
        Ok(items
            .values()
            .find(|i| i.month_id() == Some(month_id) && i.template_id() == Some(template_id))
            .cloned())
    }

    /// Insert or update an item
    pub fn upsert(&self, item: Item) -> Result<(), BudgetError> {
        self.write_guard()?.insert(item.id, item);
        Ok(())
    }

    /// Delete an item
    pub fn delete(&self, id: ItemId) -> Result<bool, BudgetError> {
        Ok(self.write_guard()?.remove(&id).is_some())
    }

    /// Delete a set of items by ID
    pub fn delete_many(&self, ids: &[ItemId]) -> Result<usize, BudgetError> {
        let mut items = self.write_guard()?;
        let before = items.len();
        for id in ids {
            items.remove(id);
        }
        Ok(before - items.len())
    }

    /// Count items
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read_guard()?.len())
    }
}
