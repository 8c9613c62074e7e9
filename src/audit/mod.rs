//! Audit trail for PettyFlow
//!
//! Records every create, update and delete that reaches the record store,
//! with before/after values, in an append-only JSON-lines file.
//!
//! - `AuditEntry`: one operation on one record.
//! - `AuditLogger`: appends entries to `audit.log` and reads them back.
//! - `generate_diff`: top-level field changes between two record states.
//!
//! Credential fields are redacted before an entry is built.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
