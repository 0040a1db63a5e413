//! Category display formatting
//!
//! Formats categories for terminal output in list and detail views.

use crate::models::{Category, Money};

/// Format a simple list of categories
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'budgetbook init' to create default categories."
            .to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:>5}  {}\n",
        "Category",
        "Order",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:->5}  {:-<12}\n",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        output.push_str(&format!(
            "{:<width$}  {:>5}  {}\n",
            category.name,
            category.sort_order,
            category.id,
            width = name_width
        ));
    }

    output
}

/// Format category details, with spending for the selected month
pub fn format_category_details(
    category: &Category,
    month_spent: Option<Money>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:         {}\n", category.id));
    output.push_str(&format!("  Sort Order: {}\n", category.sort_order));

    if let Some(spent) = month_spent {
        output.push_str(&format!("  Spent:      {}\n", spent.format_with_symbol(symbol)));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        category.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
