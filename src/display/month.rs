//! Month display formatting
//!
//! Renders the monthly budget summary table: one row per budget line with
//! budgeted, spent, and remaining columns, plus month totals.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Money, Month};

/// One budget line's row in the month summary
pub struct LineSummary {
    pub category: String,
    pub name: String,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget Line")]
    name: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Format the budget summary for one month
pub fn format_month_summary(
    month: &Month,
    lines: &[LineSummary],
    total_budgeted: Money,
    total_spent: Money,
    total_balance: Money,
    symbol: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget for {}\n\n", month.label()));

    if lines.is_empty() {
        output.push_str("No budget lines for this month.\n");
        return output;
    }

    let rows: Vec<SummaryRow> = lines
        .iter()
        .map(|line| SummaryRow {
            category: line.category.clone(),
            name: line.name.clone(),
            budgeted: line.budgeted.format_with_symbol(symbol),
            spent: line.spent.format_with_symbol(symbol),
            remaining: line.remaining.format_with_symbol(symbol),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    output.push_str(&table);
    output.push('\n');

    output.push_str(&format!(
        "\n  Budgeted: {}\n",
        total_budgeted.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Spent:    {}\n",
        total_spent.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Balance:  {}\n",
        total_balance.format_with_symbol(symbol)
    ));

    output
}

/// Format a simple list of months
pub fn format_month_list(months: &[Month], current: Option<&Month>) -> String {
    if months.is_empty() {
        return "No months found.".to_string();
    }

    let mut output = String::new();
    for month in months {
        let marker = match current {
            Some(c) if c.id == month.id => " (current)",
            _ => "",
        };
        output.push_str(&format!("  {}  {}{}\n", month, month.label(), marker));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_month_summary() {
        let month = Month::new(2022, 3);
        let lines = vec![LineSummary {
            category: "Housing".to_string(),
            name: "Rent".to_string(),
            budgeted: Money::from_cents(120000),
            spent: Money::from_cents(45000),
            remaining: Money::from_cents(75000),
        }];

        let output = format_month_summary(
            &month,
            &lines,
            Money::from_cents(120000),
            Money::from_cents(45000),
            Money::from_cents(75000),
            "$",
        );
        assert!(output.contains("March '22"));
        assert!(output.contains("Rent"));
        assert!(output.contains("$1200.00"));
        assert!(output.contains("Balance:  $750.00"));
    }

    #[test]
    fn test_format_month_summary_uses_symbol() {
        let month = Month::new(2022, 3);
        let lines = vec![LineSummary {
            category: "Housing".to_string(),
            name: "Rent".to_string(),
            budgeted: Money::from_cents(120000),
            spent: Money::zero(),
            remaining: Money::from_cents(120000),
        }];

        let output = format_month_summary(
            &month,
            &lines,
            Money::from_cents(120000),
            Money::zero(),
            Money::from_cents(120000),
            "\u{20AC}",
        );
        assert!(output.contains("\u{20AC}1200.00"));
        assert!(!output.contains('$'));
    }

    #[test]
    fn test_format_empty_summary() {
        let month = Month::new(2024, 1);
        let output = format_month_summary(
            &month,
            &[],
            Money::zero(),
            Money::zero(),
            Money::zero(),
            "$",
        );
        assert!(output.contains("No budget lines"));
    }

    #[test]
    fn test_format_month_list_marks_current() {
        let january = Month::new(2024, 1);
        let february = Month::new(2024, 2);
        let months = vec![january, february.clone()];

        let output = format_month_list(&months, Some(&february));
        assert!(output.contains("2024-01"));
        assert!(output.contains("2024-02"));
        assert!(output.contains("(current)"));
    }
}
