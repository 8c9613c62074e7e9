//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod category;
pub mod report;
pub mod transaction;
pub mod vendor;

pub use auth::{handle_login, handle_logout, handle_signup, handle_whoami};
pub use category::{handle_category_command, CategoryCommands};
pub use report::{handle_report_command, ReportArgs, ReportFormat};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use vendor::{handle_vendor_command, VendorCommands};
