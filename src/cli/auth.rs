//! Account CLI commands: signup, login, logout, whoami

use crate::auth::{AuthService, SessionService};
use crate::error::{PettyError, PettyResult};
use crate::storage::RecordStore;

/// Create an account and log in
pub fn handle_signup(
    store: &RecordStore,
    sessions: &SessionService,
    name: &str,
    email: &str,
    password: Option<String>,
) -> PettyResult<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password("Password: ")?,
    };

    match AuthService::new(store, sessions).signup(name, email, &password) {
        Ok(user) => {
            println!("Welcome, {}! You are now logged in.", user.name);
            Ok(())
        }
        // Signup reports every broken rule as one sentence list
        Err(PettyError::Validation(errors)) => Err(PettyError::Rejected(
            errors
                .iter()
                .flat_map(|(_, messages)| messages.iter().cloned())
                .collect::<Vec<_>>()
                .join(" "),
        )),
        Err(e) => Err(e),
    }
}

/// Log in with email and password
pub fn handle_login(
    store: &RecordStore,
    sessions: &SessionService,
    email: &str,
    password: Option<String>,
) -> PettyResult<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_password("Password: ")?,
    };

    match AuthService::new(store, sessions).login(email, &password) {
        Ok(user) => {
            println!("Logged in as {} <{}>", user.name, user.email);
            Ok(())
        }
        Err(PettyError::Validation(_)) => Err(PettyError::Rejected(
            "Invalid form data. Please check your inputs.".into(),
        )),
        Err(e) => Err(e),
    }
}

pub fn handle_logout(store: &RecordStore, sessions: &SessionService) -> PettyResult<()> {
    AuthService::new(store, sessions).logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn handle_whoami(store: &RecordStore, sessions: &SessionService) -> PettyResult<()> {
    let user = AuthService::new(store, sessions).require_user()?;
    println!("{} <{}> ({})", user.name, user.email, user.id);
    Ok(())
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> PettyResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| PettyError::Authentication(format!("Failed to read password: {}", e)))
}
