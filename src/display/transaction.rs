//! Transaction display formatting
//!
//! Renders transaction registers as tables. Rows are pre-joined with payee
//! and budget line names so the formatter stays free of storage access.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

/// A transaction joined with its display names
pub struct TransactionView {
    pub transaction: Transaction,
    pub payee_name: String,
    pub item_name: String,
}

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Payee")]
    payee: String,
    #[tabled(rename = "Budget Line")]
    item: String,
    #[tabled(rename = "Memo")]
    memo: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of transactions as a register table
///
/// Income transactions are shown with a leading `+`.
pub fn format_transaction_register(views: &[TransactionView], symbol: &str) -> String {
    if views.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows: Vec<RegisterRow> = views
        .iter()
        .map(|view| {
            let amount = if view.transaction.expense {
                view.transaction.amount.format_with_symbol(symbol)
            } else {
                format!("+{}", view.transaction.amount.format_with_symbol(symbol))
            };
            RegisterRow {
                date: view.transaction.date.format("%Y-%m-%d").to_string(),
                payee: view.payee_name.clone(),
                item: view.item_name.clone(),
                memo: view.transaction.memo.clone(),
                amount,
            }
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format details for one transaction
pub fn format_transaction_details(view: &TransactionView, symbol: &str) -> String {
    let mut output = String::new();
    let txn = &view.transaction;

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("  Payee:       {}\n", view.payee_name));
    output.push_str(&format!("  Budget Line: {}\n", view.item_name));
    output.push_str(&format!(
        "  Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Direction:   {}\n",
        if txn.expense { "Expense" } else { "Income" }
    ));

    if !txn.memo.is_empty() {
        output.push_str(&format!("  Memo:        {}\n", txn.memo));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, Money, PayeeId};
    use chrono::NaiveDate;

    fn view(cents: i64, expense: bool) -> TransactionView {
        TransactionView {
            transaction: Transaction::new(
                ItemId::new(),
                PayeeId::new(),
                Money::from_cents(cents),
                "first half",
                NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                expense,
            ),
            payee_name: "Landlord".to_string(),
            item_name: "Rent".to_string(),
        }
    }

    #[test]
    fn test_format_empty_register() {
        let output = format_transaction_register(&[], "$");
        assert!(output.contains("No transactions"));
    }

    #[test]
    fn test_format_register_marks_income() {
        let output = format_transaction_register(&[view(45000, true), view(10000, false)], "$");
        assert!(output.contains("Landlord"));
        assert!(output.contains("$450.00"));
        assert!(output.contains("+$100.00"));
    }

    #[test]
    fn test_format_register_uses_symbol() {
        let output = format_transaction_register(&[view(45000, true)], "\u{20AC}");
        assert!(output.contains("\u{20AC}450.00"));
        assert!(!output.contains('$'));
    }

    #[test]
    fn test_format_details() {
        let output = format_transaction_details(&view(45000, true), "$");
        assert!(output.contains("2024-03-10"));
        assert!(output.contains("Expense"));
        assert!(output.contains("first half"));
    }
}
