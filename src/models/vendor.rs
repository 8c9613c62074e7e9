//! Vendor model
//!
//! A counterparty that money is paid to or received from.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::VendorId;

/// A vendor with optional contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: VendorId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Validated fields for a vendor that does not exist yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVendor {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewVendor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial vendor update; `Some(None)` clears an optional field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub contact_person: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
}

impl VendorPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Vendor {
    pub fn from_draft(id: VendorId, draft: NewVendor) -> Self {
        Self {
            id,
            name: draft.name,
            contact_person: draft.contact_person,
            email: draft.email,
            phone: draft.phone,
        }
    }

    /// Copy of this vendor with the patch applied
    pub fn merged(&self, patch: &VendorPatch) -> Self {
        Self {
            id: self.id.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            contact_person: patch
                .contact_person
                .clone()
                .unwrap_or_else(|| self.contact_person.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            phone: patch.phone.clone().unwrap_or_else(|| self.phone.clone()),
        }
    }

    /// Normalize a vendor name for matching
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check if this vendor matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_eats() -> Vendor {
        Vendor::from_draft(
            VendorId::new("v2"),
            NewVendor {
                name: "Quick Eats Cafe".into(),
                email: Some("contact@qec.com".into()),
                ..NewVendor::default()
            },
        )
    }

    #[test]
    fn test_name_matching() {
        let vendor = quick_eats();
        assert!(vendor.matches_name("quick eats cafe"));
        assert!(vendor.matches_name("  QUICK EATS CAFE "));
        assert!(!vendor.matches_name("Quick Eats"));
    }

    #[test]
    fn test_merge_keeps_unpatched_fields() {
        let vendor = quick_eats();
        let patch = VendorPatch {
            phone: Some(Some("555-0102".into())),
            ..VendorPatch::default()
        };

        let merged = vendor.merged(&patch);
        assert_eq!(merged.name, "Quick Eats Cafe");
        assert_eq!(merged.email.as_deref(), Some("contact@qec.com"));
        assert_eq!(merged.phone.as_deref(), Some("555-0102"));
        assert_eq!(vendor.phone, None);
    }

    #[test]
    fn test_merge_clears_optional_field() {
        let patch = VendorPatch {
            email: Some(None),
            ..VendorPatch::default()
        };
        assert_eq!(quick_eats().merged(&patch).email, None);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let mut vendor = quick_eats();
        vendor.contact_person = Some("Jane Doe".into());

        let json = serde_json::to_value(&vendor).unwrap();
        assert_eq!(json["contactPerson"], "Jane Doe");
        assert!(json.get("phone").is_none());
    }
}
