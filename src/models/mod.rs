//! Core data models for PettyFlow
//!
//! Users, vendors, categories and petty cash transactions, plus the money
//! and id types they are built from. Each record has a `New*` draft used
//! when creating it and a `*Patch` applied with a pure `merged` function.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod user;
pub mod vendor;

pub use category::{Category, CategoryPatch, NewCategory};
pub use ids::{CategoryId, IdGenerator, TransactionId, UserId, VendorId};
pub use money::{Money, MoneyParseError};
pub use transaction::{NewTransaction, PaymentMode, Transaction, TransactionPatch, TransactionType};
pub use user::{NewUser, User, UserPatch};
pub use vendor::{NewVendor, Vendor, VendorPatch};
