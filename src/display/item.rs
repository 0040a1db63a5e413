//! Budget line display formatting
//!
//! Formats templates grouped by category in a tree view, and single-item
//! detail views.

use crate::models::{Category, Item, Money, Payee};

/// A category together with its template items, ready for display
pub struct CategoryWithItems {
    pub category: Category,
    pub items: Vec<Item>,
}

/// Format budget lines as a tree grouped by category
pub fn format_item_tree(groups: &[CategoryWithItems]) -> String {
    if groups.is_empty() {
        return "No budget lines found.\n\nRun 'budgetbook init' to create default budget lines."
            .to_string();
    }

    let mut output = String::new();

    for (i, group) in groups.iter().enumerate() {
        output.push_str(&format!("{}\n", group.category.name));

        if group.items.is_empty() {
            output.push_str("  (no budget lines)\n");
        } else {
            for (j, item) in group.items.iter().enumerate() {
                let is_last = j == group.items.len() - 1;
                let prefix = if is_last { "└── " } else { "├── " };
                output.push_str(&format!("  {}{}\n", prefix, item.name));
            }
        }

        if i < groups.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Format details for one monthly instance
pub fn format_item_details(
    item: &Item,
    category: Option<&Category>,
    spent: Money,
    remaining: Money,
    recent_payee: Option<&Payee>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget Line: {}\n", item.name));
    output.push_str(&format!("  ID:        {}\n", item.id));

    if let Some(category) = category {
        output.push_str(&format!("  Category:  {}\n", category.name));
    }

    output.push_str(&format!(
        "  Budgeted:  {}\n",
        item.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("  Spent:     {}\n", spent.format_with_symbol(symbol)));
    output.push_str(&format!(
        "  Remaining: {}\n",
        remaining.format_with_symbol(symbol)
    ));

    if let Some(payee) = recent_payee {
        output.push_str(&format!("  Last Paid: {}\n", payee.name));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    #[test]
    fn test_format_empty_tree() {
        let output = format_item_tree(&[]);
        assert!(output.contains("No budget lines found"));
    }

    #[test]
    fn test_format_item_tree() {
        let category = Category::new("Housing");
        let rent = Item::new_template("Rent", category.id);
        let power = Item::new_template("Power", category.id);

        let output = format_item_tree(&[CategoryWithItems {
            category,
            items: vec![rent, power],
        }]);
        assert!(output.contains("Housing"));
        assert!(output.contains("├── Rent"));
        assert!(output.contains("└── Power"));
    }

    #[test]
    fn test_format_item_details() {
        let item = Item::new_template("Rent", CategoryId::new());
        let output = format_item_details(
            &item,
            None,
            Money::from_cents(45000),
            Money::from_cents(75000),
            None,
            "$",
        );
        assert!(output.contains("Rent"));
        assert!(output.contains("$450.00"));
        assert!(output.contains("$750.00"));
    }

    #[test]
    fn test_format_item_details_uses_symbol() {
        let item = Item::new_template("Rent", CategoryId::new());
        let output = format_item_details(
            &item,
            None,
            Money::from_cents(45000),
            Money::from_cents(75000),
            None,
            "\u{20AC}",
        );
        assert!(output.contains("\u{20AC}450.00"));
        assert!(!output.contains('$'));
    }
}
