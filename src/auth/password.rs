//! Password hashing using Argon2id
//!
//! Passwords are stored as PHC strings (`$argon2id$v=19$...`) that carry
//! their own salt and cost parameters, so verification needs nothing else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{PettyError, PettyResult};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> PettyResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PettyError::Authentication(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string
///
/// A malformed stored hash never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = hash_password("secret-pass").unwrap();
        let b = hash_password("secret-pass").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("password123", "password123"));
        assert!(!verify_password("", ""));
    }
}
