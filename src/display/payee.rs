//! Payee display formatting

use crate::models::{Money, Payee};

/// Format a simple list of payees
pub fn format_payee_list(payees: &[Payee]) -> String {
    if payees.is_empty() {
        return "No payees found.".to_string();
    }

    let name_width = payees.iter().map(|p| p.name.len()).max().unwrap_or(5).max(5);

    let mut output = String::new();
    output.push_str(&format!("{:<width$}  {}\n", "Payee", "ID", width = name_width));
    output.push_str(&format!(
        "{:-<width$}  {:-<12}\n",
        "",
        "",
        width = name_width
    ));

    for payee in payees {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            payee.name,
            payee.id,
            width = name_width
        ));
    }

    output
}

/// Format payee details with lifetime spending
pub fn format_payee_details(
    payee: &Payee,
    total_spent: Money,
    transaction_count: usize,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Payee: {}\n", payee.name));
    output.push_str(&format!("  ID:           {}\n", payee.id));
    output.push_str(&format!("  Transactions: {}\n", transaction_count));
    output.push_str(&format!(
        "  Total Spent:  {}\n",
        total_spent.format_with_symbol(symbol)
    ));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        payee.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_list() {
        assert!(format_payee_list(&[]).contains("No payees"));
    }

    #[test]
    fn test_format_payee_list() {
        let payees = vec![Payee::new("Grocery Store"), Payee::new("Landlord")];
        let output = format_payee_list(&payees);
        assert!(output.contains("Grocery Store"));
        assert!(output.contains("Landlord"));
    }

    #[test]
    fn test_format_payee_details() {
        let payee = Payee::new("Landlord");
        let output = format_payee_details(&payee, Money::from_cents(90000), 2, "$");
        assert!(output.contains("Landlord"));
        assert!(output.contains("$900.00"));
        assert!(output.contains("Transactions: 2"));
    }

    #[test]
    fn test_format_payee_details_uses_symbol() {
        let payee = Payee::new("Landlord");
        let output = format_payee_details(&payee, Money::from_cents(90000), 2, "\u{20AC}");
        assert!(output.contains("\u{20AC}900.00"));
        assert!(!output.contains('$'));
    }
}
