//! Uniform view of the four persisted collections
//!
//! `Record` ties a model to its slot in the snapshot, its draft and patch
//! types and its audit identity, so the store can offer the same
//! list/get/add/update/delete contract for all of them.

use std::fmt::Display;

use serde::Serialize;

use crate::audit::EntityType;
use crate::error::PettyError;
use crate::models::{
    Category, CategoryId, CategoryPatch, NewCategory, NewTransaction, NewUser, NewVendor,
    Transaction, TransactionId, TransactionPatch, User, UserId, UserPatch, Vendor, VendorId,
    VendorPatch,
};

use super::snapshot::Snapshot;

pub trait Record: Clone + Serialize + Sized {
    type Id: Clone + PartialEq + Display + From<String>;
    type Draft;
    type Patch;

    const ENTITY: EntityType;
    const ID_PREFIX: &'static str;
    /// New records go to the front of the collection instead of the back
    const PREPEND: bool = false;

    fn id(&self) -> &Self::Id;

    /// Human label for audit entries
    fn label(&self) -> String;

    fn from_draft(id: Self::Id, draft: Self::Draft) -> Self;

    fn merged(&self, patch: &Self::Patch) -> Self;

    fn collection(snapshot: &Snapshot) -> &Vec<Self>;

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;

    fn not_found(id: &Self::Id) -> PettyError {
        PettyError::NotFound {
            entity_type: Self::ENTITY.name(),
            identifier: id.to_string(),
        }
    }
}

impl Record for User {
    type Id = UserId;
    type Draft = NewUser;
    type Patch = UserPatch;

    const ENTITY: EntityType = EntityType::User;
    const ID_PREFIX: &'static str = UserId::PREFIX;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn label(&self) -> String {
        self.email.clone()
    }

    fn from_draft(id: UserId, draft: NewUser) -> Self {
        User::from_draft(id, draft)
    }

    fn merged(&self, patch: &UserPatch) -> Self {
        User::merged(self, patch)
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.users
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.users
    }
}

impl Record for Vendor {
    type Id = VendorId;
    type Draft = NewVendor;
    type Patch = VendorPatch;

    const ENTITY: EntityType = EntityType::Vendor;
    const ID_PREFIX: &'static str = VendorId::PREFIX;

    fn id(&self) -> &VendorId {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn from_draft(id: VendorId, draft: NewVendor) -> Self {
        Vendor::from_draft(id, draft)
    }

    fn merged(&self, patch: &VendorPatch) -> Self {
        Vendor::merged(self, patch)
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.vendors
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.vendors
    }
}

impl Record for Category {
    type Id = CategoryId;
    type Draft = NewCategory;
    type Patch = CategoryPatch;

    const ENTITY: EntityType = EntityType::Category;
    const ID_PREFIX: &'static str = CategoryId::PREFIX;

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn from_draft(id: CategoryId, draft: NewCategory) -> Self {
        Category::from_draft(id, draft)
    }

    fn merged(&self, patch: &CategoryPatch) -> Self {
        Category::merged(self, patch)
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.categories
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.categories
    }
}

impl Record for Transaction {
    type Id = TransactionId;
    type Draft = NewTransaction;
    type Patch = TransactionPatch;

    const ENTITY: EntityType = EntityType::Transaction;
    const ID_PREFIX: &'static str = TransactionId::PREFIX;
    const PREPEND: bool = true;

    fn id(&self) -> &TransactionId {
        &self.id
    }

    fn label(&self) -> String {
        self.description.clone()
    }

    fn from_draft(id: TransactionId, draft: NewTransaction) -> Self {
        Transaction::from_draft(id, draft)
    }

    fn merged(&self, patch: &TransactionPatch) -> Self {
        Transaction::merged(self, patch)
    }

    fn collection(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.transactions
    }

    fn collection_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.transactions
    }
}
