//! Durable snapshot of every collection and the backends that hold it
//!
//! The whole ledger is one document. Backends only ever read or replace the
//! complete snapshot, so a failed write can never leave a half-applied change.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{PettyError, PettyResult};
use crate::models::{Category, Transaction, User, Vendor};

use super::file_io::{read_json, write_json_atomic};

/// Current on-disk layout version
pub const SCHEMA_VERSION: u32 = 1;

/// All persisted records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Newest added first
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            users: Vec::new(),
            vendors: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

/// Where the snapshot lives between runs
pub trait SnapshotBackend: Send + Sync {
    /// Load the last persisted snapshot (empty when nothing was persisted)
    fn read(&self) -> PettyResult<Snapshot>;

    /// Replace the persisted snapshot
    fn write(&self, snapshot: &Snapshot) -> PettyResult<()>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Snapshot stored as a single JSON file, replaced atomically on each write
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn read(&self) -> PettyResult<Snapshot> {
        let snapshot: Snapshot = read_json(&self.path)?;
        if snapshot.schema_version > SCHEMA_VERSION {
            return Err(PettyError::Storage(format!(
                "{} was written by a newer version (schema {})",
                self.path.display(),
                snapshot.schema_version
            )));
        }
        Ok(snapshot)
    }

    fn write(&self, snapshot: &Snapshot) -> PettyResult<()> {
        write_json_atomic(&self.path, snapshot)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot kept in memory; used by tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: Mutex<Snapshot>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotBackend for MemoryBackend {
    fn read(&self) -> PettyResult<Snapshot> {
        self.data
            .lock()
            .map(|data| data.clone())
            .map_err(|e| PettyError::Storage(format!("Failed to acquire lock: {}", e)))
    }

    fn write(&self, snapshot: &Snapshot) -> PettyResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PettyError::Storage("write rejected by backend".into()));
        }
        let mut data = self
            .data
            .lock()
            .map_err(|e| PettyError::Storage(format!("Failed to acquire lock: {}", e)))?;
        *data = snapshot.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("ledger.json"));

        let snapshot = backend.read().unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_file_backend_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("ledger.json");
        let backend = JsonFileBackend::new(path.clone());

        let mut snapshot = Snapshot::default();
        snapshot.categories = Category::defaults();
        backend.write(&snapshot).unwrap();

        let reopened = JsonFileBackend::new(path);
        assert_eq!(reopened.read().unwrap(), snapshot);
    }

    #[test]
    fn test_file_backend_rejects_newer_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(&path, r#"{"schemaVersion": 99}"#).unwrap();

        let err = JsonFileBackend::new(path).read().unwrap_err();
        assert!(matches!(err, PettyError::Storage(_)));
    }

    #[test]
    fn test_memory_backend_failing_writes() {
        let backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        assert!(backend.write(&Snapshot::default()).is_err());

        backend.set_fail_writes(false);
        backend.write(&Snapshot::default()).unwrap();
    }
}
