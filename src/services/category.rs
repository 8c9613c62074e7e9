//! Category service
//!
//! Categories are reference data seeded at init; the service only reads them.

use std::collections::HashMap;

use crate::error::{PettyError, PettyResult};
use crate::models::{Category, CategoryId};
use crate::storage::RecordStore;

/// Shown wherever a transaction points at a category or vendor that is gone
pub const MISSING_NAME: &str = "N/A";

/// Service for category lookups
pub struct CategoryService<'a> {
    store: &'a RecordStore,
}

impl<'a> CategoryService<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> PettyResult<Vec<Category>> {
        self.store.categories().list()
    }

    pub fn get(&self, id: &CategoryId) -> PettyResult<Category> {
        self.store.categories().get(id)
    }

    /// Find a category by id, then by name (case-insensitive)
    pub fn find(&self, identifier: &str) -> PettyResult<Option<Category>> {
        let categories = self.list()?;
        Ok(categories
            .iter()
            .find(|c| c.id.as_str() == identifier)
            .or_else(|| categories.iter().find(|c| c.matches_name(identifier)))
            .cloned())
    }

    /// Like `find`, but a miss is an error
    pub fn resolve(&self, identifier: &str) -> PettyResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| PettyError::category_not_found(identifier))
    }

    /// Display name for a category id, `N/A` when it no longer exists
    pub fn name_of(&self, id: &CategoryId) -> PettyResult<String> {
        Ok(self
            .store
            .categories()
            .find(id)?
            .map(|c| c.name)
            .unwrap_or_else(|| MISSING_NAME.to_string()))
    }

    /// Id -> name map for rendering many rows at once
    pub fn names(&self) -> PettyResult<HashMap<CategoryId, String>> {
        Ok(self.list()?.into_iter().map(|c| (c.id, c.name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_reference_data;

    fn seeded() -> RecordStore {
        let store = RecordStore::in_memory();
        seed_reference_data(&store).unwrap();
        store
    }

    #[test]
    fn test_list_defaults_in_order() {
        let store = seeded();
        let names: Vec<String> = CategoryService::new(&store)
            .list()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "Office Supplies");
        assert_eq!(names[5], "Client Revenue");
    }

    #[test]
    fn test_find_by_id_or_name() {
        let store = seeded();
        let service = CategoryService::new(&store);

        assert_eq!(service.find("c6").unwrap().unwrap().name, "Client Revenue");
        assert_eq!(
            service.find("client revenue").unwrap().unwrap().id.as_str(),
            "c6"
        );
        assert!(service.find("Groceries").unwrap().is_none());
        assert!(service.resolve("Groceries").unwrap_err().is_not_found());
    }

    #[test]
    fn test_name_of_falls_back_for_dangling_ids() {
        let store = seeded();
        let service = CategoryService::new(&store);

        assert_eq!(service.name_of(&CategoryId::new("c1")).unwrap(), "Office Supplies");
        assert_eq!(service.name_of(&CategoryId::new("c99")).unwrap(), "N/A");
        assert!(service.get(&CategoryId::new("c99")).unwrap_err().is_not_found());
    }
}
