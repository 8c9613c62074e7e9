//! PettyFlow - Terminal-based petty cash ledger
//!
//! This library provides the core functionality for the PettyFlow ledger:
//! recording small cash income and expenses against vendors and categories,
//! computing the running balance, and producing filtered reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, vendors, categories, transactions)
//! - `storage`: Snapshot-based record store
//! - `services`: Validation and ledger calculations
//! - `reports`: Report filtering and export
//! - `auth`: Password hashing and login sessions
//! - `ai`: Assistant for report summaries and category suggestions
//! - `audit`: Audit logging system
//! - `actions`: Conversion of results into user-facing messages
//!
//! # Example
//!
//! ```rust,ignore
//! use pettyflow::config::{PettyPaths, Settings};
//! use pettyflow::storage::RecordStore;
//! use pettyflow::services::Dashboard;
//!
//! let paths = PettyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = RecordStore::open_paths(&paths)?;
//! let dashboard = Dashboard::build(&store, &settings)?;
//! ```

pub mod actions;
pub mod ai;
pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PettyError, PettyResult};
