//! Display formatting for terminal output
//!
//! Formats ledger records as plain-text tables and detail views. Vendor and
//! category references are resolved through `Names`, which shows `N/A` for
//! records that no longer exist.

pub mod category;
pub mod dashboard;
pub mod transaction;
pub mod vendor;

use std::collections::HashMap;

use crate::error::PettyResult;
use crate::models::{CategoryId, VendorId};
use crate::services::{CategoryService, MISSING_NAME};
use crate::storage::RecordStore;

pub use category::format_category_list;
pub use dashboard::format_dashboard;
pub use transaction::{format_transaction_details, format_transaction_register};
pub use vendor::{format_vendor_details, format_vendor_list};

/// Vendor and category names by id
#[derive(Debug, Clone, Default)]
pub struct Names {
    vendors: HashMap<VendorId, String>,
    categories: HashMap<CategoryId, String>,
}

impl Names {
    pub fn load(store: &RecordStore) -> PettyResult<Self> {
        Ok(Self {
            vendors: store
                .vendors()
                .list()?
                .into_iter()
                .map(|v| (v.id, v.name))
                .collect(),
            categories: CategoryService::new(store).names()?,
        })
    }

    pub fn vendor(&self, id: &VendorId) -> &str {
        self.vendors.get(id).map_or(MISSING_NAME, String::as_str)
    }

    pub fn category(&self, id: &CategoryId) -> &str {
        self.categories.get(id).map_or(MISSING_NAME, String::as_str)
    }
}

/// Cut `s` to at most `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_demo_data;

    #[test]
    fn test_names_fall_back_to_na() {
        let store = RecordStore::in_memory();
        seed_demo_data(&store).unwrap();
        let names = Names::load(&store).unwrap();

        assert_eq!(names.vendor(&VendorId::new("v1")), "Office Supplies Co.");
        assert_eq!(names.vendor(&VendorId::new("v0")), "N/A");
        assert_eq!(names.category(&CategoryId::new("c3")), "Travel");
        assert_eq!(names.category(&CategoryId::new("c0")), "N/A");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Monthly subscription for design tool", 12), "Monthly s...");
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }
}
