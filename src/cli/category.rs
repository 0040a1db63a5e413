//! Category CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::category::{format_category_details, format_category_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::Category;
use crate::services::{CategoryService, MonthService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category (or return the existing one with this name)
    Create {
        /// Category name
        name: String,
    },

    /// Show category details with current-month spending
    Show {
        /// Category name or ID
        category: String,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },

    /// Delete a category, moving its budget lines to 'None'
    Delete {
        /// Category name or ID
        category: String,
    },

    /// Reorder categories by listing their names in the new order
    Reorder {
        /// Category names, first to last
        categories: Vec<String>,
    },
}

/// Resolve a category argument by exact name or ID
fn find_category(service: &CategoryService, arg: &str) -> BudgetResult<Category> {
    if let Some(category) = service.get_by_name(arg)? {
        return Ok(category);
    }
    if let Ok(id) = arg.parse() {
        if let Some(category) = service.get(id)? {
            return Ok(category);
        }
    }
    Err(BudgetError::category_not_found(arg))
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> BudgetResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create { name } => {
            let category = service.find_or_create(&name)?;
            println!("Created category: {}", category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = find_category(&service, &category)?;

            let months = MonthService::new(storage);
            let spent = match months.for_date(chrono::Local::now().date_naive())? {
                Some(month) => Some(months.category_spent(month.id, category.id)?),
                None => None,
            };

            print!(
                "{}",
                format_category_details(&category, spent, &settings.currency_symbol)
            );
        }

        CategoryCommands::Rename { category, name } => {
            let category = find_category(&service, &category)?;
            let renamed = service.rename(category.id, &name)?;
            println!("Renamed category: {}", renamed.name);
        }

        CategoryCommands::Delete { category } => {
            let category = find_category(&service, &category)?;
            service.delete(category.id)?;
            println!("Deleted category: {}", category.name);
        }

        CategoryCommands::Reorder { categories } => {
            let mut order = Vec::with_capacity(categories.len());
            for name in &categories {
                order.push(find_category(&service, name)?.id);
            }
            service.reorder(&order)?;
            println!("Reordered {} categories", order.len());
        }
    }

    Ok(())
}
