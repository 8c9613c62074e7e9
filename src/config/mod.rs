//! Configuration module for PettyFlow
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (opening balance, currency, sessions, AI)

pub mod paths;
pub mod settings;

pub use paths::PettyPaths;
pub use settings::{AiSettings, Settings};
