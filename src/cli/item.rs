//! Budget line CLI commands
//!
//! Budget lines are addressed by template name. Commands that work with a
//! monthly amount resolve the instance for the requested month, defaulting
//! to the current one.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::item::{format_item_details, format_item_tree, CategoryWithItems};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Item, Money, Month, NONE_CATEGORY};
use crate::services::{CategoryService, ItemService, MonthService};
use crate::storage::Storage;

/// Budget line subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// List all budget lines grouped by category
    List,

    /// Add a new budget line
    Add {
        /// Budget line name
        name: String,
        /// Category name (defaults to 'None')
        #[arg(short, long)]
        category: Option<String>,
        /// Budgeted amount for the current month (e.g., "1200" or "1200.50")
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Show a budget line's details for one month
    Show {
        /// Budget line name
        item: String,
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Edit a budget line
    ///
    /// Name and category changes apply to every month; the amount applies
    /// only to the selected month.
    Edit {
        /// Budget line name
        item: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New budgeted amount for the selected month
        #[arg(short, long)]
        amount: Option<String>,
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget line from every month, with its transactions
    Delete {
        /// Budget line name
        item: String,
    },

    /// Reorder budget lines by listing their names in the new order
    Reorder {
        /// Budget line names, first to last
        items: Vec<String>,
    },
}

/// Resolve a budget line argument to its template by exact name or ID
pub(crate) fn find_template(storage: &Storage, arg: &str) -> BudgetResult<Item> {
    for template in storage.items.templates()? {
        if template.name == arg {
            return Ok(template);
        }
    }
    if let Ok(id) = arg.parse() {
        if let Some(item) = storage.items.get(id)? {
            let template_id = item.template_id().unwrap_or(item.id);
            if let Some(template) = storage.items.get(template_id)? {
                return Ok(template);
            }
        }
    }
    Err(BudgetError::item_not_found(arg))
}

/// Resolve an optional YYYY-MM argument, defaulting to the current month
fn resolve_month(storage: &Storage, arg: Option<&str>) -> BudgetResult<Month> {
    let months = MonthService::new(storage);
    match arg {
        Some(s) => {
            let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
                .map_err(|_| BudgetError::Validation(format!("Invalid month '{}', expected YYYY-MM", s)))?;
            months.find_or_create(date)
        }
        None => months.current(),
    }
}

fn parse_amount(arg: &str) -> BudgetResult<Money> {
    Money::parse(arg).map_err(|e| BudgetError::Validation(format!("Invalid amount: {}", e)))
}

/// Handle a budget line command
pub fn handle_item_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ItemCommands,
) -> BudgetResult<()> {
    let service = ItemService::new(storage);

    match cmd {
        ItemCommands::List => {
            let categories = CategoryService::new(storage).list()?;
            let mut groups = Vec::new();
            for category in categories {
                let items = storage.items.templates_in_category(category.id)?;
                if !items.is_empty() {
                    groups.push(CategoryWithItems { category, items });
                }
            }
            print!("{}", format_item_tree(&groups));
        }

        ItemCommands::Add {
            name,
            category,
            amount,
        } => {
            let category_name = category.as_deref().unwrap_or(NONE_CATEGORY);
            let category = CategoryService::new(storage).find_or_create(category_name)?;
            let amount = amount.as_deref().map(parse_amount).transpose()?;

            let template = service.create_template(&name, category.id)?;
            let month = MonthService::new(storage).current()?;
            let instance = service.create_instance(
                template.id,
                month.id,
                amount.unwrap_or_else(Money::zero),
                true,
            )?;

            println!("Created budget line: {}", template.name);
            println!("  Category: {}", category.name);
            println!(
                "  Budgeted: {} for {}",
                instance.amount.format_with_symbol(&settings.currency_symbol),
                month.label()
            );
        }

        ItemCommands::Show { item, month } => {
            let template = find_template(storage, &item)?;
            let month = resolve_month(storage, month.as_deref())?;

            let instance = storage
                .items
                .instance_for(month.id, template.id)?
                .ok_or_else(|| BudgetError::item_not_found(&item))?;

            let category = storage.categories.get(instance.category_id)?;
            let spent = service.total_spent(instance.id)?;
            let remaining = service.total_remaining(instance.id)?;
            let recent = service.most_recent_payee(instance.id)?;

            println!("Month: {}", month.label());
            print!(
                "{}",
                format_item_details(
                    &instance,
                    category.as_ref(),
                    spent,
                    remaining,
                    recent.as_ref(),
                    &settings.currency_symbol
                )
            );
        }

        ItemCommands::Edit {
            item,
            name,
            category,
            amount,
            month,
        } => {
            let template = find_template(storage, &item)?;
            let month = resolve_month(storage, month.as_deref())?;

            let instance = storage
                .items
                .instance_for(month.id, template.id)?
                .ok_or_else(|| BudgetError::item_not_found(&item))?;

            let category_id = match category {
                Some(name) => Some(CategoryService::new(storage).find_or_create(&name)?.id),
                None => None,
            };
            let amount = amount.as_deref().map(parse_amount).transpose()?;

            let updated = service.edit(instance.id, name.as_deref(), category_id, amount)?;
            println!("Updated budget line: {}", updated.name);
        }

        ItemCommands::Delete { item } => {
            let template = find_template(storage, &item)?;
            service.delete(template.id)?;
            println!("Deleted budget line: {}", template.name);
        }

        ItemCommands::Reorder { items } => {
            let mut order = Vec::with_capacity(items.len());
            for name in &items {
                order.push(find_template(storage, name)?.id);
            }
            service.reorder(&order)?;
            println!("Reordered {} budget lines", order.len());
        }
    }

    Ok(())
}
