//! Accounts, password hashing and login sessions

pub mod password;
pub mod service;
pub mod session;

pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use session::{SessionRecord, SessionService};
