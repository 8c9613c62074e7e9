//! Custom error types for PettyFlow
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Validation failures carry a field-keyed
//! message map so the command layer can show every problem at once.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Field name -> messages for every rule the input broke
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a map holding a single message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a message against a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// `Ok(value)` when nothing was recorded, otherwise a validation error
    pub fn into_result<T>(self, value: T) -> PettyResult<T> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(PettyError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

/// The main error type for PettyFlow operations
#[derive(Error, Debug)]
pub enum PettyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// User-correctable input errors, keyed by field
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A business rule blocked the operation
    #[error("{0}")]
    Conflict(String),

    /// Persistence failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// The AI provider failed or is unavailable
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Login and session failures
    #[error("{0}")]
    Authentication(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A command was refused; the message is already fit for the user
    #[error("{0}")]
    Rejected(String),
}

impl PettyError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for vendors
    pub fn vendor_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Vendor",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a validation error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Field errors, when this is a validation error
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PettyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PettyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for PettyFlow operations
pub type PettyResult<T> = Result<T, PettyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PettyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PettyError::vendor_not_found("v9");
        assert_eq!(err.to_string(), "Vendor not found: v9");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_field_errors_collect_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("amount", "Amount must be greater than 0");
        errors.add("description", "Description is required");
        errors.add("amount", "Expected number");

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("amount").unwrap(),
            ["Amount must be greater than 0", "Expected number"]
        );
        assert_eq!(
            errors.to_string(),
            "amount: Amount must be greater than 0, Expected number; description: Description is required"
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FieldErrors::new().into_result(7).unwrap(), 7);

        let err = FieldErrors::single("name", "Name already exists")
            .into_result(())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.field_errors().unwrap().get("name").unwrap(),
            ["Name already exists"]
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PettyError = io_err.into();
        assert!(matches!(err, PettyError::Io(_)));
    }
}
