//! Turning service results into user-facing messages
//!
//! Every create/edit/delete ends in a `FormState`: a message plus any field
//! errors. Storage failures are logged in full and reported generically;
//! validation failures keep their per-field messages.

use tracing::error;

use crate::error::{FieldErrors, PettyError, PettyResult};

/// Mutations the command layer reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateTransaction,
    UpdateTransaction,
    DeleteTransaction,
    CreateVendor,
    UpdateVendor,
    DeleteVendor,
}

impl Action {
    fn verb(&self) -> &'static str {
        match self {
            Self::CreateTransaction | Self::CreateVendor => "Create",
            Self::UpdateTransaction | Self::UpdateVendor => "Update",
            Self::DeleteTransaction | Self::DeleteVendor => "Delete",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Self::CreateTransaction | Self::CreateVendor => "created",
            Self::UpdateTransaction | Self::UpdateVendor => "updated",
            Self::DeleteTransaction | Self::DeleteVendor => "deleted",
        }
    }

    fn entity(&self) -> &'static str {
        match self {
            Self::CreateTransaction | Self::UpdateTransaction | Self::DeleteTransaction => {
                "Transaction"
            }
            Self::CreateVendor | Self::UpdateVendor | Self::DeleteVendor => "Vendor",
        }
    }

    pub fn success_message(&self) -> String {
        format!(
            "Successfully {} {}",
            self.past_tense(),
            self.entity().to_lowercase()
        )
    }

    pub fn invalid_message(&self) -> String {
        format!(
            "Failed to {} {}. Please check your inputs.",
            self.verb().to_lowercase(),
            self.entity().to_lowercase()
        )
    }

    pub fn storage_message(&self) -> String {
        format!("Database Error: Failed to {} {}.", self.verb(), self.entity())
    }
}

/// Outcome of a form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub message: String,
    pub errors: FieldErrors,
    pub success: bool,
}

impl FormState {
    pub fn from_result<T>(action: Action, result: &PettyResult<T>) -> Self {
        match result {
            Ok(_) => Self {
                message: action.success_message(),
                errors: FieldErrors::new(),
                success: true,
            },
            Err(PettyError::Validation(errors)) => Self {
                message: action.invalid_message(),
                errors: errors.clone(),
                success: false,
            },
            Err(e @ (PettyError::Storage(_) | PettyError::Io(_) | PettyError::Json(_))) => {
                error!(error = %e, action = ?action, "mutation failed");
                Self {
                    message: action.storage_message(),
                    errors: FieldErrors::new(),
                    success: false,
                }
            }
            Err(e) => Self {
                message: e.to_string(),
                errors: FieldErrors::new(),
                success: false,
            },
        }
    }

    /// The success message, or the rendered failure as an error
    pub fn into_result(self) -> PettyResult<String> {
        if self.success {
            Ok(self.message)
        } else {
            Err(PettyError::Rejected(self.render()))
        }
    }

    /// Message followed by one line per field error
    pub fn render(&self) -> String {
        let mut output = self.message.clone();
        for (field, messages) in self.errors.iter() {
            for message in messages {
                output.push_str(&format!("\n  {}: {}", field, message));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_messages() {
        let ok: PettyResult<()> = Ok(());
        let state = FormState::from_result(Action::CreateTransaction, &ok);
        assert!(state.success);
        assert_eq!(state.message, "Successfully created transaction");
        assert_eq!(
            FormState::from_result(Action::UpdateTransaction, &ok).message,
            "Successfully updated transaction"
        );
    }

    #[test]
    fn test_validation_keeps_field_errors() {
        let err: PettyResult<()> = Err(PettyError::field("amount", "Amount must be greater than 0"));
        let state = FormState::from_result(Action::CreateTransaction, &err);

        assert!(!state.success);
        assert_eq!(
            state.message,
            "Failed to create transaction. Please check your inputs."
        );
        assert_eq!(
            state.errors.get("amount").unwrap(),
            ["Amount must be greater than 0"]
        );
        assert!(state.render().ends_with("\n  amount: Amount must be greater than 0"));
        assert!(matches!(state.into_result(), Err(PettyError::Rejected(_))));
    }

    #[test]
    fn test_storage_errors_are_generic() {
        let err: PettyResult<()> = Err(PettyError::Storage("disk full".into()));
        let state = FormState::from_result(Action::DeleteTransaction, &err);
        assert_eq!(state.message, "Database Error: Failed to Delete Transaction.");
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_conflicts_pass_through() {
        let err: PettyResult<()> = Err(PettyError::Conflict(
            "Cannot delete vendor with associated transactions.".into(),
        ));
        let state = FormState::from_result(Action::DeleteVendor, &err);
        assert_eq!(
            state.message,
            "Cannot delete vendor with associated transactions."
        );
    }
}
