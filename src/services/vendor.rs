//! Vendor service
//!
//! Vendor creation with duplicate-name detection, edits, and the deletion
//! guard that keeps vendors with transactions on the books.

use tracing::{debug, info};

use crate::error::{FieldErrors, PettyError, PettyResult};
use crate::models::{NewVendor, Transaction, Vendor, VendorId, VendorPatch};
use crate::storage::RecordStore;

use super::ledger::{can_delete_vendor, vendor_stats, VendorStats};
use super::validation::{is_valid_email, non_blank, required};

/// Raw vendor fields as entered by the user; blank optional fields are unset
#[derive(Debug, Clone, Default)]
pub struct VendorForm {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl VendorForm {
    pub fn validate(&self) -> PettyResult<NewVendor> {
        let mut errors = FieldErrors::new();
        let name = required(&mut errors, "name", &self.name, "Name is required");
        let email = optional_email(&mut errors, self.email.as_deref());

        match name {
            Some(name) if errors.is_empty() => Ok(NewVendor {
                name,
                contact_person: self.contact_person.as_deref().and_then(non_blank),
                email,
                phone: self.phone.as_deref().and_then(non_blank),
            }),
            _ => Err(PettyError::Validation(errors)),
        }
    }
}

/// Raw vendor edits; `None` leaves a field alone, a blank value clears it
#[derive(Debug, Clone, Default)]
pub struct VendorEditForm {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl VendorEditForm {
    pub fn validate(&self) -> PettyResult<VendorPatch> {
        let mut errors = FieldErrors::new();
        let mut patch = VendorPatch::default();

        if let Some(name) = &self.name {
            patch.name = required(&mut errors, "name", name, "Name is required");
        }
        if let Some(email) = &self.email {
            patch.email = Some(optional_email(&mut errors, Some(email.as_str())));
        }
        patch.contact_person = self.contact_person.as_deref().map(non_blank);
        patch.phone = self.phone.as_deref().map(non_blank);

        errors.into_result(patch)
    }
}

fn optional_email(errors: &mut FieldErrors, input: Option<&str>) -> Option<String> {
    let email = input.and_then(non_blank)?;
    if is_valid_email(&email) {
        Some(email)
    } else {
        errors.add("email", "Invalid email address");
        None
    }
}

/// A vendor together with its transaction totals
#[derive(Debug, Clone)]
pub struct VendorSummary {
    pub vendor: Vendor,
    pub stats: VendorStats,
}

/// Service for vendor management
pub struct VendorService<'a> {
    store: &'a RecordStore,
}

impl<'a> VendorService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Create a vendor; names must be unique ignoring case and padding
    pub fn create(&self, form: &VendorForm) -> PettyResult<Vendor> {
        let draft = form.validate()?;

        let vendor = self.store.transact(|batch| {
            if batch
                .list::<Vendor>()
                .iter()
                .any(|v| v.matches_name(&draft.name))
            {
                return Err(PettyError::field("name", "Name already exists"));
            }
            Ok(batch.add::<Vendor>(draft))
        })?;

        debug!(id = %vendor.id, name = %vendor.name, "vendor created");
        Ok(vendor)
    }

    /// Merge validated edits into an existing vendor
    pub fn edit(&self, id: &VendorId, form: &VendorEditForm) -> PettyResult<Vendor> {
        let patch = form.validate()?;
        self.store.vendors().update(id, &patch)
    }

    /// Delete a vendor that no transaction references
    ///
    /// The reference check and the removal run under the store's write lock,
    /// so a transaction cannot be added for the vendor in between.
    pub fn delete(&self, id: &VendorId) -> PettyResult<Vendor> {
        let removed = self.store.transact(|batch| {
            batch.get::<Vendor>(id)?;
            if !can_delete_vendor(id, batch.list::<Transaction>()) {
                return Err(PettyError::Conflict(
                    "Cannot delete vendor with associated transactions.".into(),
                ));
            }
            batch.delete::<Vendor>(id)
        })?;

        info!(id = %removed.id, name = %removed.name, "vendor deleted");
        Ok(removed)
    }

    pub fn get(&self, id: &VendorId) -> PettyResult<Vendor> {
        self.store.vendors().get(id)
    }

    /// Find a vendor by id, then by name (case-insensitive)
    pub fn find(&self, identifier: &str) -> PettyResult<Option<Vendor>> {
        let vendors = self.store.vendors().list()?;
        Ok(vendors
            .iter()
            .find(|v| v.id.as_str() == identifier)
            .or_else(|| vendors.iter().find(|v| v.matches_name(identifier)))
            .cloned())
    }

    /// Like `find`, but a miss is an error
    pub fn resolve(&self, identifier: &str) -> PettyResult<Vendor> {
        self.find(identifier)?
            .ok_or_else(|| PettyError::vendor_not_found(identifier))
    }

    pub fn list(&self) -> PettyResult<Vec<Vendor>> {
        self.store.vendors().list()
    }

    /// Vendor details with spend and income totals
    pub fn stats(&self, id: &VendorId) -> PettyResult<VendorSummary> {
        let vendor = self.get(id)?;
        let transactions = self.store.transactions().list()?;
        Ok(VendorSummary {
            stats: vendor_stats(id, &transactions),
            vendor,
        })
    }
}
