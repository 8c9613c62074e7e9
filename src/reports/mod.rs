//! Reports module for PettyFlow
//!
//! Filters the ledger by date, category and vendor and renders the result as
//! a terminal table, CSV, JSON or YAML.

pub mod filter;
pub mod petty_cash;

pub use filter::{aggregate, filter, DateWindow, ReportFilter, ReportTotals};
pub use petty_cash::{PettyCashReport, ReportRow};
