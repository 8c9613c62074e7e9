//! Category model
//!
//! Categories are reference data: seeded on init and only read afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
}

/// Categories written on first run: (id, name)
pub const DEFAULT_CATEGORIES: [(&str, &str); 6] = [
    ("c1", "Office Supplies"),
    ("c2", "Food & Beverage"),
    ("c3", "Travel"),
    ("c4", "Software"),
    ("c5", "Utilities"),
    ("c6", "Client Revenue"),
];

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn from_draft(id: CategoryId, draft: NewCategory) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    pub fn merged(&self, patch: &CategoryPatch) -> Self {
        Self {
            id: self.id.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
        }
    }

    /// Check if this category matches a name (case-insensitive)
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// The default category set
    pub fn defaults() -> Vec<Self> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name)| Self::new(*id, *name))
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let categories = Category::defaults();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[5].id.as_str(), "c6");
        assert_eq!(categories[5].name, "Client Revenue");
    }

    #[test]
    fn test_matches_name() {
        let category = Category::new("c2", "Food & Beverage");
        assert!(category.matches_name("food & beverage"));
        assert!(!category.matches_name("Food"));
    }
}
