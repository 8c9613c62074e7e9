//! Transaction CLI commands
//!
//! Implements CLI commands for recording and editing petty cash transactions.

use clap::Subcommand;

use crate::actions::{Action, FormState};
use crate::ai::{self, Assistant};
use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register, Names};
use crate::error::PettyResult;
use crate::models::{Transaction, TransactionId};
use crate::services::{
    CategoryService, TransactionEditForm, TransactionForm, TransactionService, VendorService,
};
use crate::storage::RecordStore;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions, most recently added first
    List {
        /// Only transactions for this vendor (name or ID)
        #[arg(short, long)]
        vendor: Option<String>,
        /// Only transactions in this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Record a transaction
    Add {
        /// Description of what the money was for
        description: String,
        /// Amount, e.g. 120.50
        amount: String,
        /// Vendor name or ID
        #[arg(short, long)]
        vendor: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// cash, upi, bank or others
        #[arg(short, long, default_value = "cash")]
        mode: String,
        /// Transaction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Change fields of a transaction
    Edit {
        /// Transaction ID
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        /// Vendor name or ID
        #[arg(long)]
        vendor: Option<String>,
        /// Category name or ID
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// New notes; pass an empty string to clear them
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Ask the assistant which categories fit a transaction
    Suggest {
        /// Transaction description
        description: String,
        /// Vendor name
        #[arg(short, long, default_value = "")]
        vendor: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    store: &RecordStore,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PettyResult<()> {
    let service = TransactionService::new(store);

    match cmd {
        TransactionCommands::List {
            vendor,
            category,
            limit,
        } => {
            let vendor_id = match vendor {
                Some(v) => Some(VendorService::new(store).resolve(&v)?.id),
                None => None,
            };
            let category_id = match category {
                Some(c) => Some(CategoryService::new(store).resolve(&c)?.id),
                None => None,
            };

            let transactions: Vec<Transaction> = service
                .list()?
                .into_iter()
                .filter(|t| vendor_id.as_ref().map_or(true, |id| &t.vendor_id == id))
                .filter(|t| category_id.as_ref().map_or(true, |id| &t.category_id == id))
                .take(limit)
                .collect();

            let names = Names::load(store)?;
            print!("{}", format_transaction_register(&transactions, &names, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service.get(&TransactionId::new(id))?;
            let names = Names::load(store)?;
            print!("{}", format_transaction_details(&txn, &names, settings));
        }

        TransactionCommands::Add {
            description,
            amount,
            vendor,
            category,
            kind,
            mode,
            date,
            notes,
        } => {
            let form = TransactionForm {
                date: date.unwrap_or_else(|| chrono::Local::now().date_naive().to_string()),
                description,
                vendor_id: resolve_vendor_id(store, &vendor)?,
                category_id: resolve_category_id(store, &category)?,
                amount,
                kind,
                payment_mode: mode,
                notes,
            };

            let result = service.create(&form);
            let message = FormState::from_result(Action::CreateTransaction, &result).into_result()?;
            if let Ok(txn) = result {
                println!("{} ({})", message, txn.id);
            }
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            vendor,
            category,
            kind,
            mode,
            date,
            notes,
        } => {
            let form = TransactionEditForm {
                date,
                description,
                vendor_id: vendor.map(|v| resolve_vendor_id(store, &v)).transpose()?,
                category_id: category.map(|c| resolve_category_id(store, &c)).transpose()?,
                amount,
                kind,
                payment_mode: mode,
                notes,
            };

            let result = service.edit(&TransactionId::new(id), &form);
            println!(
                "{}",
                FormState::from_result(Action::UpdateTransaction, &result).into_result()?
            );
        }

        TransactionCommands::Delete { id } => {
            let result = service.delete(&TransactionId::new(id));
            println!(
                "{}",
                FormState::from_result(Action::DeleteTransaction, &result).into_result()?
            );
        }

        TransactionCommands::Suggest {
            description,
            vendor,
        } => {
            let assistant = ai::assistant_from_settings(&settings.ai);
            suggest(store, assistant.as_ref(), &description, &vendor)?;
        }
    }

    Ok(())
}

fn suggest(
    store: &RecordStore,
    assistant: &dyn Assistant,
    description: &str,
    vendor: &str,
) -> PettyResult<()> {
    let categories = CategoryService::new(store).list()?;
    let suggested = ai::suggest_categories(assistant, description, vendor, &categories);

    if suggested.is_empty() {
        println!("No category suggestions available.");
    } else {
        println!("Suggested categories:");
        for category in suggested {
            println!("  {} ({})", category.name, category.id);
        }
    }
    Ok(())
}

/// A known vendor's ID, or the input unchanged so validation can judge it
fn resolve_vendor_id(store: &RecordStore, input: &str) -> PettyResult<String> {
    Ok(VendorService::new(store)
        .find(input.trim())?
        .map(|v| v.id.to_string())
        .unwrap_or_else(|| input.to_string()))
}

/// A known category's ID, or the input unchanged so validation can judge it
fn resolve_category_id(store: &RecordStore, input: &str) -> PettyResult<String> {
    Ok(CategoryService::new(store)
        .find(input.trim())?
        .map(|c| c.id.to_string())
        .unwrap_or_else(|| input.to_string()))
}
