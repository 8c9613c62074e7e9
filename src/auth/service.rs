//! Account signup and login

use tracing::{debug, info};

use crate::error::{FieldErrors, PettyError, PettyResult};
use crate::models::{NewUser, User};
use crate::services::validation::is_valid_email;
use crate::storage::RecordStore;

use super::password::{hash_password, verify_password};
use super::session::SessionService;

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 6;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Signup, login and logout over the user collection and the session file
pub struct AuthService<'a> {
    store: &'a RecordStore,
    sessions: &'a SessionService,
}

impl<'a> AuthService<'a> {
    pub fn new(store: &'a RecordStore, sessions: &'a SessionService) -> Self {
        Self { store, sessions }
    }

    /// Create an account and log it in
    pub fn signup(&self, name: &str, email: &str, password: &str) -> PettyResult<User> {
        let mut errors = FieldErrors::new();
        if name.trim().chars().count() < MIN_NAME_LEN {
            errors.add("name", "Name must be at least 2 characters.");
        }
        check_credentials(&mut errors, email, password);
        errors.into_result(())?;

        let email = email.trim().to_string();
        let password_hash = hash_password(password)?;

        let user = self.store.transact(|batch| {
            if batch.list::<User>().iter().any(|u| u.has_email(&email)) {
                return Err(PettyError::Authentication(
                    "An account with this email already exists.".into(),
                ));
            }
            Ok(batch.add::<User>(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash,
            }))
        })?;

        info!(user = %user.id, "account created");
        self.sessions.create_session(&user)?;
        Ok(user)
    }

    /// Check credentials and open a session
    pub fn login(&self, email: &str, password: &str) -> PettyResult<User> {
        let mut errors = FieldErrors::new();
        check_credentials(&mut errors, email, password);
        errors.into_result(())?;

        let user = self
            .store
            .users()
            .list()?
            .into_iter()
            .find(|u| u.has_email(email))
            .filter(|u| verify_password(password, &u.password_hash))
            .ok_or_else(|| PettyError::Authentication(INVALID_CREDENTIALS.into()))?;

        self.sessions.create_session(&user)?;
        debug!(user = %user.id, "logged in");
        Ok(user)
    }

    pub fn logout(&self) -> PettyResult<()> {
        self.sessions.delete_session()
    }

    /// The logged-in user, or an authentication error
    pub fn require_user(&self) -> PettyResult<User> {
        self.sessions
            .get_session(self.store)
            .ok_or_else(|| PettyError::Authentication("Not logged in. Run `pettyflow login` first.".into()))
    }
}

fn check_credentials(errors: &mut FieldErrors, email: &str, password: &str) {
    if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", "Password must be at least 6 characters.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::init::{DEMO_EMAIL, DEMO_PASSWORD};
    use crate::storage::seed_demo_data;
    use chrono::Duration;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SessionService, RecordStore) {
        let temp_dir = TempDir::new().unwrap();
        let sessions =
            SessionService::with_ttl(temp_dir.path().join("session.json"), Duration::hours(24));
        let store = RecordStore::in_memory();
        seed_demo_data(&store).unwrap();
        (temp_dir, sessions, store)
    }

    #[test]
    fn test_signup_opens_session() {
        let (_dir, sessions, store) = setup();
        let auth = AuthService::new(&store, &sessions);

        let user = auth.signup("Priya", "priya@example.com", "hunter22").unwrap();
        assert_ne!(user.password_hash, "hunter22");
        assert_eq!(auth.require_user().unwrap(), user);
    }

    #[test]
    fn test_signup_validation_messages() {
        let (_dir, sessions, store) = setup();
        let auth = AuthService::new(&store, &sessions);

        let err = auth.signup("P", "nope", "123").unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(errors.get("name").unwrap(), ["Name must be at least 2 characters."]);
        assert_eq!(errors.get("email").unwrap(), ["Please enter a valid email."]);
        assert_eq!(
            errors.get("password").unwrap(),
            ["Password must be at least 6 characters."]
        );
    }

    #[test]
    fn test_signup_duplicate_email() {
        let (_dir, sessions, store) = setup();
        let auth = AuthService::new(&store, &sessions);

        let err = auth
            .signup("Someone", "ADMIN@pettyflow.com", "password123")
            .unwrap_err();
        assert_eq!(err.to_string(), "An account with this email already exists.");
        assert_eq!(store.users().count().unwrap(), 1);
    }

    #[test]
    fn test_login_with_demo_account() {
        let (_dir, sessions, store) = setup();
        let auth = AuthService::new(&store, &sessions);

        let user = auth.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert_eq!(user.name, "Admin User");
        assert_eq!(auth.require_user().unwrap().id, user.id);
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let (_dir, sessions, store) = setup();
        let auth = AuthService::new(&store, &sessions);

        for (email, password) in [(DEMO_EMAIL, "wrong-pass"), ("nobody@pettyflow.com", DEMO_PASSWORD)] {
            let err = auth.login(email, password).unwrap_err();
            assert_eq!(err.to_string(), INVALID_CREDENTIALS);
        }
        assert!(auth.require_user().is_err());
    }

    #[test]
    fn test_logout() {
        let (_dir, sessions, store) = setup();
        let auth = AuthService::new(&store, &sessions);

        auth.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        auth.logout().unwrap();
        assert!(matches!(
            auth.require_user().unwrap_err(),
            PettyError::Authentication(_)
        ));
    }
}
