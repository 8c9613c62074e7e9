//! Transaction service
//!
//! Validates raw form input into transactions and patches, then hands them to
//! the record store. Foreign keys are only required to be non-empty; a
//! transaction may point at a vendor or category that no longer exists.

use tracing::debug;

use crate::error::{FieldErrors, PettyError, PettyResult};
use crate::models::{
    CategoryId, NewTransaction, PaymentMode, Transaction, TransactionId, TransactionPatch,
    TransactionType, VendorId,
};
use crate::storage::RecordStore;

use super::validation::{non_blank, parse_date, positive_amount, required};

/// Raw transaction fields as entered by the user
#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub date: String,
    pub description: String,
    pub vendor_id: String,
    pub category_id: String,
    pub amount: String,
    pub kind: String,
    pub payment_mode: String,
    pub notes: Option<String>,
}

impl TransactionForm {
    /// Check every field, collecting all problems keyed by field name
    pub fn validate(&self) -> PettyResult<NewTransaction> {
        let mut errors = FieldErrors::new();

        let date = parse_date(&self.date);
        if date.is_none() {
            errors.add("date", "Invalid date");
        }
        let description = required(
            &mut errors,
            "description",
            &self.description,
            "Description is required",
        );
        let vendor_id = required(&mut errors, "vendorId", &self.vendor_id, "Vendor is required");
        let category_id = required(
            &mut errors,
            "categoryId",
            &self.category_id,
            "Category is required",
        );
        let amount = positive_amount(&mut errors, "amount", &self.amount);
        let kind = parse_kind(&mut errors, &self.kind);
        let payment_mode = parse_payment_mode(&mut errors, &self.payment_mode);

        // Every `None` above has recorded a message
        let (
            Some(date),
            Some(description),
            Some(vendor_id),
            Some(category_id),
            Some(amount),
            Some(kind),
            Some(payment_mode),
        ) = (date, description, vendor_id, category_id, amount, kind, payment_mode)
        else {
            return Err(PettyError::Validation(errors));
        };

        Ok(NewTransaction {
            date,
            description,
            vendor_id: VendorId::new(vendor_id),
            category_id: CategoryId::new(category_id),
            amount,
            kind,
            payment_mode,
            notes: self.notes.as_deref().and_then(non_blank),
        })
    }
}

/// Raw edits; `None` leaves the field as it is, an empty `notes` clears it
#[derive(Debug, Clone, Default)]
pub struct TransactionEditForm {
    pub date: Option<String>,
    pub description: Option<String>,
    pub vendor_id: Option<String>,
    pub category_id: Option<String>,
    pub amount: Option<String>,
    pub kind: Option<String>,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
}

impl TransactionEditForm {
    /// Apply the creation rules to the supplied fields only
    pub fn validate(&self) -> PettyResult<TransactionPatch> {
        let mut errors = FieldErrors::new();
        let mut patch = TransactionPatch::default();

        if let Some(date) = &self.date {
            patch.date = parse_date(date);
            if patch.date.is_none() {
                errors.add("date", "Invalid date");
            }
        }
        if let Some(description) = &self.description {
            patch.description = required(
                &mut errors,
                "description",
                description,
                "Description is required",
            );
        }
        if let Some(vendor_id) = &self.vendor_id {
            patch.vendor_id =
                required(&mut errors, "vendorId", vendor_id, "Vendor is required").map(VendorId::new);
        }
        if let Some(category_id) = &self.category_id {
            patch.category_id =
                required(&mut errors, "categoryId", category_id, "Category is required")
                    .map(CategoryId::new);
        }
        if let Some(amount) = &self.amount {
            patch.amount = positive_amount(&mut errors, "amount", amount);
        }
        if let Some(kind) = &self.kind {
            patch.kind = parse_kind(&mut errors, kind);
        }
        if let Some(mode) = &self.payment_mode {
            patch.payment_mode = parse_payment_mode(&mut errors, mode);
        }
        if let Some(notes) = &self.notes {
            patch.notes = Some(non_blank(notes));
        }

        errors.into_result(patch)
    }
}

fn parse_kind(errors: &mut FieldErrors, input: &str) -> Option<TransactionType> {
    match input.parse() {
        Ok(kind) => Some(kind),
        Err(_) => {
            errors.add("type", "Type must be income or expense");
            None
        }
    }
}

fn parse_payment_mode(errors: &mut FieldErrors, input: &str) -> Option<PaymentMode> {
    match input.parse() {
        Ok(mode) => Some(mode),
        Err(_) => {
            errors.add("paymentMode", "Payment mode must be cash, upi, bank or others");
            None
        }
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    store: &'a RecordStore,
}

impl<'a> TransactionService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Validate and store a new transaction
    pub fn create(&self, form: &TransactionForm) -> PettyResult<Transaction> {
        let draft = form.validate()?;
        let txn = self.store.transactions().add(draft)?;
        debug!(id = %txn.id, amount = %txn.amount, kind = txn.kind.as_str(), "transaction created");
        Ok(txn)
    }

    /// Validate the supplied fields and merge them into an existing transaction
    pub fn edit(&self, id: &TransactionId, form: &TransactionEditForm) -> PettyResult<Transaction> {
        let patch = form.validate()?;
        self.store.transactions().update(id, &patch)
    }

    pub fn delete(&self, id: &TransactionId) -> PettyResult<Transaction> {
        self.store.transactions().delete(id)
    }

    pub fn get(&self, id: &TransactionId) -> PettyResult<Transaction> {
        self.store.transactions().get(id)
    }

    /// All transactions, most recently added first
    pub fn list(&self) -> PettyResult<Vec<Transaction>> {
        self.store.transactions().list()
    }
}
