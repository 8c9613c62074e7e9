//! Transaction display formatting
//!
//! Register and detail views for transactions.

use crate::config::Settings;
use crate::models::{Transaction, TransactionType};

use super::{truncate, Names};

/// Amount with its direction: `+₹1000.00` for income, `-₹55.00` for expenses
pub fn signed_amount(txn: &Transaction, settings: &Settings) -> String {
    let sign = match txn.kind {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };
    format!("{}{}", sign, settings.format_money(txn.amount))
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, names: &Names, settings: &Settings) -> String {
    format!(
        "{:<16} {:10} {:28} {:20} {:16} {:>13}",
        truncate(txn.id.as_str(), 16),
        txn.date.format(&settings.date_format).to_string(),
        truncate(&txn.description, 28),
        truncate(names.vendor(&txn.vendor_id), 20),
        truncate(names.category(&txn.category_id), 16),
        signed_amount(txn, settings)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    names: &Names,
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:10} {:28} {:20} {:16} {:>13}\n",
        "ID", "Date", "Description", "Vendor", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(108));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, names, settings));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, names: &Names, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction:  {}\n", txn.id));
    output.push_str(&format!("Date:         {}\n", txn.date.format(&settings.date_format)));
    output.push_str(&format!("Description:  {}\n", txn.description));
    output.push_str(&format!("Amount:       {}\n", signed_amount(txn, settings)));
    output.push_str(&format!("Type:         {}\n", txn.kind.as_str()));
    output.push_str(&format!("Payment mode: {}\n", txn.payment_mode));
    output.push_str(&format!(
        "Vendor:       {} ({})\n",
        names.vendor(&txn.vendor_id),
        txn.vendor_id
    ));
    output.push_str(&format!(
        "Category:     {} ({})\n",
        names.category(&txn.category_id),
        txn.category_id
    ));

    if let Some(notes) = &txn.notes {
        output.push_str(&format!("Notes:        {}\n", notes));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::init::demo_transactions;

    #[test]
    fn test_register_resolves_names_and_signs() {
        let transactions = demo_transactions();
        let output =
            format_transaction_register(&transactions[..1], &Names::default(), &Settings::default());

        assert!(output.contains("Printer paper and pens"));
        assert!(output.contains("N/A"));
        assert!(output.contains("-₹55.00"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], &Names::default(), &Settings::default()),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_details() {
        let txn = demo_transactions().remove(4);
        let output = format_transaction_details(&txn, &Names::default(), &Settings::default());
        assert!(output.contains("Amount:       +₹1000.00"));
        assert!(output.contains("Vendor:       N/A (v5)"));
        assert!(!output.contains("Notes:"));
    }
}
