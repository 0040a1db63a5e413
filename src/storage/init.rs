//! Storage initialization
//!
//! Handles first-run setup: the reserved "None" category is created
//! explicitly here (never lazily mid-operation), along with starter
//! categories, their template items, and the current month.

use chrono::Local;

use crate::error::BudgetError;
use crate::models::{Category, Item, Money, Month, NONE_CATEGORY};

use super::Storage;

/// Starter categories and their template items
const STARTER_ITEMS: &[(&str, &[&str])] = &[
    (
        "Monthly Expenses",
        &["Housing", "Utilities", "Online Services", "Insurance"],
    ),
    (
        "Daily Expenses",
        &["Groceries", "Personal Care", "Home Goods", "Spending Money"],
    ),
    (
        "Transportation",
        &["Car Payment", "Insurance", "Gas", "Maintenance"],
    ),
    ("Savings", &["Investing", "Debt Payoff"]),
];

/// Initialize storage for a fresh installation
///
/// Creates the "None" category, starter categories with template items, and
/// the current month with one zero-amount instance per template. A no-op if
/// any category already exists.
pub fn initialize_storage(storage: &Storage) -> Result<(), BudgetError> {
    if storage.categories.count()? > 0 {
        return Ok(());
    }

    let mut none = Category::new(NONE_CATEGORY);
    none.sort_order = 0;
    storage.categories.upsert(none)?;

    let today = Local::now().date_naive();
    let month = Month::containing(today);
    let month_id = month.id;
    storage.months.upsert(month)?;

    for (i, (category_name, item_names)) in STARTER_ITEMS.iter().enumerate() {
        let mut category = Category::new(*category_name);
        category.sort_order = i as i32 + 1;
        let category_id = category.id;
        storage.categories.upsert(category)?;

        for (j, item_name) in item_names.iter().enumerate() {
            let mut template = Item::new_template(*item_name, category_id);
            template.sort_order = j as i32;

            let instance = Item::new_instance(&template, month_id, Money::zero());
            storage.items.upsert(template)?;
            storage.items.upsert(instance)?;
        }
    }

    storage.save_all()?;

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(storage: &Storage) -> Result<bool, BudgetError> {
    Ok(storage.categories.count()? == 0)
}
