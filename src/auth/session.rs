//! Login sessions
//!
//! A session is an opaque token bound to a user id with an expiry, kept in
//! `session.json` under the data directory. The token carries no user data;
//! the user is looked up in the record store on every read.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::PettyPaths;
use crate::error::PettyResult;
use crate::models::{User, UserId};
use crate::storage::{read_json, remove_if_exists, write_json_atomic, RecordStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub token: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Reads and writes the session file
pub struct SessionService {
    path: PathBuf,
    ttl: Duration,
}

impl SessionService {
    pub fn new(paths: &PettyPaths, ttl_hours: i64) -> Self {
        Self::with_ttl(paths.session_file(), Duration::hours(ttl_hours))
    }

    pub fn with_ttl(path: PathBuf, ttl: Duration) -> Self {
        Self { path, ttl }
    }

    /// Start a session for `user`, replacing any existing one
    pub fn create_session(&self, user: &User) -> PettyResult<SessionRecord> {
        let now = Utc::now();
        let record = SessionRecord {
            token: Uuid::new_v4(),
            user_id: user.id.clone(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        write_json_atomic(&self.path, &record)?;
        debug!(user = %user.id, expires_at = %record.expires_at, "session created");
        Ok(record)
    }

    /// The logged-in user, if there is a live session for one that still exists
    ///
    /// A missing, unreadable or expired session reads as logged out. Expired
    /// sessions are removed.
    pub fn get_session(&self, store: &RecordStore) -> Option<User> {
        let record = match read_json::<Option<SessionRecord>, _>(&self.path) {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable session file");
                return None;
            }
        };

        if record.is_expired(Utc::now()) {
            warn!(user = %record.user_id, "session expired");
            if let Err(e) = self.delete_session() {
                warn!(error = %e, "failed to remove expired session");
            }
            return None;
        }

        match store.users().find(&record.user_id) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "failed to look up session user");
                None
            }
        }
    }

    pub fn delete_session(&self) -> PettyResult<()> {
        remove_if_exists(&self.path)
    }
}
