//! Service layer for PettyFlow
//!
//! The service layer provides business logic on top of the record store,
//! handling validation, computed figures, and cross-entity rules.

pub mod category;
pub mod dashboard;
pub mod ledger;
pub mod transaction;
pub mod validation;
pub mod vendor;

pub use category::{CategoryService, MISSING_NAME};
pub use dashboard::Dashboard;
pub use ledger::{MonthlySummary, Totals, VendorStats};
pub use transaction::{TransactionEditForm, TransactionForm, TransactionService};
pub use vendor::{VendorEditForm, VendorForm, VendorService, VendorSummary};
