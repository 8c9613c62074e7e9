//! Storage initialization
//!
//! First-run setup: default categories, plus optional demo data so a fresh
//! install has something to look at.

use chrono::NaiveDate;
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::{PettyError, PettyResult};
use crate::models::{
    Category, CategoryId, Money, PaymentMode, Transaction, TransactionId, TransactionType, User,
    UserId, Vendor, VendorId,
};

use super::store::{Batch, RecordStore};

/// Login for the demo account
pub const DEMO_EMAIL: &str = "admin@pettyflow.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Insert the default categories when the category collection is empty
///
/// Returns the number of categories written.
pub fn seed_reference_data(store: &RecordStore) -> PettyResult<usize> {
    store.transact(|batch| {
        if !batch.list::<Category>().is_empty() {
            return Ok(0);
        }
        let defaults = Category::defaults();
        let count = defaults.len();
        for category in defaults {
            batch.insert(category)?;
        }
        info!(count, "seeded default categories");
        Ok(count)
    })
}

/// Insert the demo vendors, transactions and admin account
///
/// Refuses to run against a ledger that already holds vendors or
/// transactions.
pub fn seed_demo_data(store: &RecordStore) -> PettyResult<()> {
    seed_reference_data(store)?;
    let password_hash = hash_password(DEMO_PASSWORD)?;

    store.transact(|batch| {
        let snapshot = batch.snapshot();
        if !snapshot.vendors.is_empty() || !snapshot.transactions.is_empty() {
            return Err(PettyError::Conflict(
                "Demo data can only be loaded into an empty ledger".into(),
            ));
        }

        for vendor in demo_vendors() {
            batch.insert(vendor)?;
        }

        // Stored newest-added first, so insert oldest first
        for transaction in demo_transactions().into_iter().rev() {
            batch.insert(transaction)?;
        }

        insert_demo_user(batch, password_hash)?;
        info!("seeded demo data");
        Ok(())
    })
}

fn insert_demo_user(batch: &mut Batch<'_>, password_hash: String) -> PettyResult<()> {
    if batch.list::<User>().iter().any(|u| u.has_email(DEMO_EMAIL)) {
        return Ok(());
    }
    batch.insert(User {
        id: UserId::new("u1"),
        name: "Admin User".into(),
        email: DEMO_EMAIL.into(),
        password_hash,
    })?;
    Ok(())
}

fn vendor(id: &str, name: &str, contact: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Vendor {
    Vendor {
        id: VendorId::new(id),
        name: name.into(),
        contact_person: contact.map(String::from),
        email: email.map(String::from),
        phone: phone.map(String::from),
    }
}

fn demo_vendors() -> Vec<Vendor> {
    vec![
        vendor("v1", "Office Supplies Co.", None, Some("sales@officesupplies.com"), None),
        vendor("v2", "Quick Eats Cafe", None, Some("contact@qec.com"), None),
        vendor("v3", "City Transport", None, None, Some("555-0103")),
        vendor("v4", "Tech Solutions Ltd.", Some("Jane Doe"), None, None),
        vendor("v5", "Client A", None, Some("contact@clienta.com"), None),
    ]
}

/// Demo transactions, newest first
pub fn demo_transactions() -> Vec<Transaction> {
    use PaymentMode::{Bank, Cash, Others};
    use TransactionType::{Expense, Income};

    let rows: [(&str, (i32, u32, u32), &str, &str, &str, i64, TransactionType, PaymentMode); 7] = [
        ("t1", (2024, 5, 20), "Printer paper and pens", "v1", "c1", 5500, Expense, Others),
        ("t2", (2024, 5, 20), "Team lunch", "v2", "c2", 12050, Expense, Cash),
        ("t3", (2024, 5, 19), "Taxi fare for client meeting", "v3", "c3", 3500, Expense, Cash),
        ("t4", (2024, 5, 18), "Monthly subscription for design tool", "v4", "c4", 4900, Expense, Bank),
        ("t5", (2024, 5, 15), "Initial cash deposit", "v5", "c6", 100000, Income, Cash),
        ("t6", (2024, 4, 25), "Payment for project phase 1", "v5", "c6", 150000, Income, Bank),
        ("t7", (2024, 4, 10), "Internet Bill", "v3", "c5", 8000, Expense, Bank),
    ];

    rows.into_iter()
        .filter_map(|(id, (y, m, d), description, vendor_id, category_id, amount, kind, mode)| {
            Some(Transaction {
                id: TransactionId::new(id),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                description: description.into(),
                vendor_id: VendorId::new(vendor_id),
                category_id: CategoryId::new(category_id),
                amount: Money::from_minor(amount),
                kind,
                payment_mode: mode,
                notes: None,
            })
        })
        .collect()
}
