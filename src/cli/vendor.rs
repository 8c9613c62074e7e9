//! Vendor CLI commands

use clap::Subcommand;

use crate::actions::{Action, FormState};
use crate::config::Settings;
use crate::display::{format_vendor_details, format_vendor_list, Names};
use crate::error::PettyResult;
use crate::services::{VendorEditForm, VendorForm, VendorService};
use crate::storage::RecordStore;

/// Vendor subcommands
#[derive(Subcommand)]
pub enum VendorCommands {
    /// List all vendors
    List,
    /// Show a vendor with its totals and transactions
    Show {
        /// Vendor name or ID
        vendor: String,
    },
    /// Add a vendor
    Add {
        /// Vendor name (must be unique)
        name: String,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change vendor details; an empty value clears an optional field
    Edit {
        /// Vendor name or ID
        vendor: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a vendor that has no transactions
    Delete {
        /// Vendor name or ID
        vendor: String,
    },
}

/// Handle a vendor command
pub fn handle_vendor_command(
    store: &RecordStore,
    settings: &Settings,
    cmd: VendorCommands,
) -> PettyResult<()> {
    let service = VendorService::new(store);

    match cmd {
        VendorCommands::List => {
            print!("{}", format_vendor_list(&service.list()?));
        }

        VendorCommands::Show { vendor } => {
            let vendor = service.resolve(&vendor)?;
            let summary = service.stats(&vendor.id)?;
            let names = Names::load(store)?;
            print!("{}", format_vendor_details(&summary, &names, settings));
        }

        VendorCommands::Add {
            name,
            contact,
            email,
            phone,
        } => {
            let form = VendorForm {
                name,
                contact_person: contact,
                email,
                phone,
            };
            let result = service.create(&form);
            let message = FormState::from_result(Action::CreateVendor, &result).into_result()?;
            if let Ok(vendor) = result {
                println!("{} ({})", message, vendor.id);
            }
        }

        VendorCommands::Edit {
            vendor,
            name,
            contact,
            email,
            phone,
        } => {
            let target = service.resolve(&vendor)?;
            let form = VendorEditForm {
                name,
                contact_person: contact,
                email,
                phone,
            };
            let result = service.edit(&target.id, &form);
            println!(
                "{}",
                FormState::from_result(Action::UpdateVendor, &result).into_result()?
            );
        }

        VendorCommands::Delete { vendor } => {
            let target = service.resolve(&vendor)?;
            let result = service.delete(&target.id);
            println!(
                "{}",
                FormState::from_result(Action::DeleteVendor, &result).into_result()?
            );
        }
    }

    Ok(())
}
