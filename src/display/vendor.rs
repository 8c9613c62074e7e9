//! Vendor display formatting

use crate::config::Settings;
use crate::models::Vendor;
use crate::services::VendorSummary;

use super::transaction::format_transaction_register;
use super::{truncate, Names};

/// Format vendors as a table
pub fn format_vendor_list(vendors: &[Vendor]) -> String {
    if vendors.is_empty() {
        return "No vendors found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:28} {:18} {:28} {:14}\n",
        "ID", "Name", "Contact", "Email", "Phone"
    ));
    output.push_str(&"-".repeat(108));
    output.push('\n');

    for vendor in vendors {
        output.push_str(&format!(
            "{:<16} {:28} {:18} {:28} {:14}\n",
            truncate(vendor.id.as_str(), 16),
            truncate(&vendor.name, 28),
            truncate(vendor.contact_person.as_deref().unwrap_or("-"), 18),
            truncate(vendor.email.as_deref().unwrap_or("-"), 28),
            truncate(vendor.phone.as_deref().unwrap_or("-"), 14),
        ));
    }

    output.push_str(&format!("\nTotal: {} vendors\n", vendors.len()));
    output
}

/// Vendor contact details, totals and transaction history
pub fn format_vendor_details(summary: &VendorSummary, names: &Names, settings: &Settings) -> String {
    let vendor = &summary.vendor;
    let stats = &summary.stats;
    let mut output = String::new();

    output.push_str(&format!("Vendor:  {}\n", vendor.name));
    output.push_str(&format!("ID:      {}\n", vendor.id));
    if let Some(contact) = &vendor.contact_person {
        output.push_str(&format!("Contact: {}\n", contact));
    }
    if let Some(email) = &vendor.email {
        output.push_str(&format!("Email:   {}\n", email));
    }
    if let Some(phone) = &vendor.phone {
        output.push_str(&format!("Phone:   {}\n", phone));
    }

    output.push('\n');
    output.push_str(&format!("Total spent:  {}\n", settings.format_money(stats.total_spent)));
    output.push_str(&format!("Total earned: {}\n", settings.format_money(stats.total_earned)));
    output.push_str(&format!("Transactions: {}\n\n", stats.count));
    output.push_str(&format_transaction_register(&stats.transactions, names, settings));

    output
}
