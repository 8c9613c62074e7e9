//! User model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// An account holder; the password is only ever stored as a PHC hash string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl User {
    pub fn from_draft(id: UserId, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            password_hash: draft.password_hash,
        }
    }

    pub fn merged(&self, patch: &UserPatch) -> Self {
        Self {
            id: self.id.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            password_hash: patch
                .password_hash
                .clone()
                .unwrap_or_else(|| self.password_hash.clone()),
        }
    }

    /// Emails compare case-insensitively
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
