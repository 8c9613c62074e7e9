//! The record store
//!
//! One `RecordStore` is built at startup and handed to every service. It keeps
//! the current snapshot behind a single mutex that doubles as the global write
//! lock: every mutation runs as a batch that works on a copy of the snapshot,
//! persists the copy, and only then replaces the in-memory state. A batch
//! that fails at any point leaves memory and disk exactly as they were.

use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::PettyPaths;
use crate::error::{PettyError, PettyResult};
use crate::models::{Category, IdGenerator, Transaction, User, Vendor};

use super::record::Record;
use super::snapshot::{JsonFileBackend, MemoryBackend, Snapshot, SnapshotBackend};

pub struct RecordStore {
    backend: Box<dyn SnapshotBackend>,
    state: Mutex<Snapshot>,
    ids: IdGenerator,
    audit: Option<AuditLogger>,
}

impl RecordStore {
    /// Load the snapshot from `backend`
    pub fn open(backend: impl SnapshotBackend + 'static) -> PettyResult<Self> {
        let snapshot = backend.read()?;
        debug!(
            backend = %backend.describe(),
            users = snapshot.users.len(),
            vendors = snapshot.vendors.len(),
            categories = snapshot.categories.len(),
            transactions = snapshot.transactions.len(),
            "record store opened"
        );

        Ok(Self {
            backend: Box::new(backend),
            state: Mutex::new(snapshot),
            ids: IdGenerator::new(),
            audit: None,
        })
    }

    /// Open the ledger file under `paths`, auditing to its audit log
    pub fn open_paths(paths: &PettyPaths) -> PettyResult<Self> {
        paths.ensure_directories()?;
        let store = Self::open(JsonFileBackend::new(paths.ledger_file()))?;
        Ok(store.with_audit(AuditLogger::new(paths.audit_log())))
    }

    /// Empty store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(MemoryBackend::new()),
            state: Mutex::new(Snapshot::default()),
            ids: IdGenerator::new(),
            audit: None,
        }
    }

    /// Record every committed mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    fn lock(&self) -> PettyResult<MutexGuard<'_, Snapshot>> {
        self.state
            .lock()
            .map_err(|e| PettyError::Storage(format!("Failed to acquire store lock: {}", e)))
    }

    /// Copy of everything currently stored
    pub fn snapshot(&self) -> PettyResult<Snapshot> {
        Ok(self.lock()?.clone())
    }

    /// Run a read-only closure against the current snapshot
    pub fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> PettyResult<T> {
        let state = self.lock()?;
        Ok(f(&state))
    }

    /// Run a read-check-modify sequence as one atomic, persisted step
    ///
    /// The closure sees the latest persisted state and no other mutation in
    /// this process can run until it returns. Its changes are persisted only
    /// if it returns `Ok`; if the closure or the write fails nothing changes.
    ///
    /// The backend is re-read first, so writes made by another process since
    /// `open` are kept. Separate processes are not locked against each other:
    /// two writers that both read before either writes still lose one change.
    pub fn transact<T>(&self, f: impl FnOnce(&mut Batch<'_>) -> PettyResult<T>) -> PettyResult<T> {
        let mut state = self.lock()?;
        let mut working = self.backend.read()?;
        *state = working.clone();

        let mut batch = Batch {
            snapshot: &mut working,
            ids: &self.ids,
            audit: Vec::new(),
        };
        let value = f(&mut batch)?;
        let entries = batch.audit;

        if entries.is_empty() {
            return Ok(value);
        }

        if let Err(e) = self.backend.write(&working) {
            error!(error = %e, backend = %self.backend.describe(), "failed to persist ledger");
            return Err(e);
        }
        *state = working;
        drop(state);

        self.record_audit(&entries);
        Ok(value)
    }

    fn record_audit(&self, entries: &[AuditEntry]) {
        for entry in entries {
            debug!(
                operation = %entry.operation,
                entity = %entry.entity_type,
                id = %entry.entity_id,
                "record committed"
            );
            if let Some(logger) = &self.audit {
                if let Err(e) = logger.log(entry) {
                    warn!(error = %e, "failed to append audit entry");
                }
            }
        }
    }

    /// Typed access to one collection
    pub fn repository<R: Record>(&self) -> Repository<'_, R> {
        Repository {
            store: self,
            _record: PhantomData,
        }
    }

    pub fn users(&self) -> Repository<'_, User> {
        self.repository()
    }

    pub fn vendors(&self) -> Repository<'_, Vendor> {
        self.repository()
    }

    pub fn categories(&self) -> Repository<'_, Category> {
        self.repository()
    }

    pub fn transactions(&self) -> Repository<'_, Transaction> {
        self.repository()
    }
}

/// Mutable view of the working snapshot inside `RecordStore::transact`
pub struct Batch<'s> {
    snapshot: &'s mut Snapshot,
    ids: &'s IdGenerator,
    audit: Vec<AuditEntry>,
}

impl<'s> Batch<'s> {
    /// State as modified so far by this batch
    pub fn snapshot(&self) -> &Snapshot {
        self.snapshot
    }

    pub fn list<R: Record>(&self) -> &[R] {
        R::collection(self.snapshot)
    }

    pub fn find<R: Record>(&self, id: &R::Id) -> Option<&R> {
        R::collection(self.snapshot).iter().find(|r| r.id() == id)
    }

    pub fn get<R: Record>(&self, id: &R::Id) -> PettyResult<&R> {
        self.find::<R>(id).ok_or_else(|| R::not_found(id))
    }

    /// Create a record from a draft under a freshly generated id
    pub fn add<R: Record>(&mut self, draft: R::Draft) -> R {
        let existing = R::collection(self.snapshot);
        let raw = self.ids.next(R::ID_PREFIX, |candidate| {
            existing.iter().any(|r| r.id().to_string() == candidate)
        });

        let record = R::from_draft(R::Id::from(raw), draft);
        self.push(record.clone());
        self.audit.push(AuditEntry::create(
            R::ENTITY,
            record.id().to_string(),
            Some(record.label()),
            &record,
        ));
        record
    }

    /// Store a record under the id it already carries (seed data, imports)
    pub fn insert<R: Record>(&mut self, record: R) -> PettyResult<R> {
        if self.find::<R>(record.id()).is_some() {
            return Err(PettyError::Conflict(format!(
                "{} {} already exists",
                R::ENTITY,
                record.id()
            )));
        }

        self.push(record.clone());
        self.audit.push(AuditEntry::create(
            R::ENTITY,
            record.id().to_string(),
            Some(record.label()),
            &record,
        ));
        Ok(record)
    }

    /// Merge `patch` into the record with `id`
    pub fn update<R: Record>(&mut self, id: &R::Id, patch: &R::Patch) -> PettyResult<R> {
        let slot = R::collection_mut(self.snapshot)
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| R::not_found(id))?;

        let before = slot.clone();
        let after = before.merged(patch);
        *slot = after.clone();

        self.audit.push(AuditEntry::update(
            R::ENTITY,
            id.to_string(),
            Some(after.label()),
            &before,
            &after,
        ));
        Ok(after)
    }

    /// Remove the record with `id`
    pub fn delete<R: Record>(&mut self, id: &R::Id) -> PettyResult<R> {
        let collection = R::collection_mut(self.snapshot);
        let position = collection
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| R::not_found(id))?;

        let removed = collection.remove(position);
        self.audit.push(AuditEntry::delete(
            R::ENTITY,
            id.to_string(),
            Some(removed.label()),
            &removed,
        ));
        Ok(removed)
    }

    fn push<R: Record>(&mut self, record: R) {
        let collection = R::collection_mut(self.snapshot);
        if R::PREPEND {
            collection.insert(0, record);
        } else {
            collection.push(record);
        }
    }
}

/// List/get/add/update/delete over one collection of a `RecordStore`
///
/// Every call returns owned copies; changing them does not touch the store.
pub struct Repository<'a, R: Record> {
    store: &'a RecordStore,
    _record: PhantomData<R>,
}

impl<'a, R: Record> Repository<'a, R> {
    /// All records in stored order
    pub fn list(&self) -> PettyResult<Vec<R>> {
        self.store.read(|s| R::collection(s).clone())
    }

    pub fn count(&self) -> PettyResult<usize> {
        self.store.read(|s| R::collection(s).len())
    }

    pub fn find(&self, id: &R::Id) -> PettyResult<Option<R>> {
        self.store
            .read(|s| R::collection(s).iter().find(|r| r.id() == id).cloned())
    }

    /// The record with `id`, or a not-found error
    pub fn get(&self, id: &R::Id) -> PettyResult<R> {
        self.find(id)?.ok_or_else(|| R::not_found(id))
    }

    pub fn add(&self, draft: R::Draft) -> PettyResult<R> {
        self.store.transact(|batch| Ok(batch.add::<R>(draft)))
    }

    pub fn update(&self, id: &R::Id, patch: &R::Patch) -> PettyResult<R> {
        self.store.transact(|batch| batch.update::<R>(id, patch))
    }

    pub fn delete(&self, id: &R::Id) -> PettyResult<R> {
        self.store.transact(|batch| batch.delete::<R>(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CategoryId, Money, NewTransaction, NewVendor, PaymentMode, TransactionId,
        TransactionPatch, TransactionType, VendorId, VendorPatch,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn draft(description: &str, amount: i64) -> NewTransaction {
        NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            description: description.into(),
            vendor_id: VendorId::new("v1"),
            category_id: CategoryId::new("c1"),
            amount: Money::from_minor(amount),
            kind: TransactionType::Expense,
            payment_mode: PaymentMode::Cash,
            notes: None,
        }
    }

    /// Backend shared with the test so its contents can be inspected
    struct SharedBackend(Arc<MemoryBackend>);

    impl SnapshotBackend for SharedBackend {
        fn read(&self) -> PettyResult<Snapshot> {
            self.0.read()
        }
        fn write(&self, snapshot: &Snapshot) -> PettyResult<()> {
            self.0.write(snapshot)
        }
        fn describe(&self) -> String {
            self.0.describe()
        }
    }

    #[test]
    fn test_add_then_get_round_trip() {
        let store = RecordStore::in_memory();
        let added = store.transactions().add(draft("Team lunch", 12050)).unwrap();

        assert!(added.id.as_str().starts_with('t'));
        assert_eq!(store.transactions().get(&added.id).unwrap(), added);
    }

    #[test]
    fn test_transactions_are_prepended_vendors_appended() {
        let store = RecordStore::in_memory();
        let first = store.transactions().add(draft("first", 100)).unwrap();
        let second = store.transactions().add(draft("second", 200)).unwrap();

        let listed = store.transactions().list().unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        let a = store.vendors().add(NewVendor::named("A")).unwrap();
        let b = store.vendors().add(NewVendor::named("B")).unwrap();
        let vendors = store.vendors().list().unwrap();
        assert_eq!(vendors[0].id, a.id);
        assert_eq!(vendors[1].id, b.id);
    }

    #[test]
    fn test_update_then_get_returns_merged_record() {
        let store = RecordStore::in_memory();
        let added = store.transactions().add(draft("Taxi", 3500)).unwrap();

        let patch = TransactionPatch {
            amount: Some(Money::from_minor(4000)),
            ..TransactionPatch::default()
        };
        let updated = store.transactions().update(&added.id, &patch).unwrap();

        assert_eq!(updated, added.merged(&patch));
        assert_eq!(store.transactions().get(&added.id).unwrap(), updated);
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let store = RecordStore::in_memory();
        let missing = TransactionId::new("t404");

        assert!(store.transactions().get(&missing).unwrap_err().is_not_found());
        assert!(store
            .transactions()
            .update(&missing, &TransactionPatch::default())
            .unwrap_err()
            .is_not_found());
        assert!(store.transactions().delete(&missing).unwrap_err().is_not_found());
        assert!(store
            .vendors()
            .update(&VendorId::new("v404"), &VendorPatch::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_returned_copies_are_detached() {
        let store = RecordStore::in_memory();
        store.vendors().add(NewVendor::named("Quick Eats Cafe")).unwrap();

        let mut listed = store.vendors().list().unwrap();
        listed[0].name = "Changed".into();
        listed.clear();

        assert_eq!(store.vendors().list().unwrap()[0].name, "Quick Eats Cafe");
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let backend = Arc::new(MemoryBackend::new());
        let store = RecordStore::open(SharedBackend(backend.clone())).unwrap();
        store.transactions().add(draft("kept", 100)).unwrap();

        backend.set_fail_writes(true);
        let err = store.transactions().add(draft("lost", 200)).unwrap_err();
        assert!(matches!(err, PettyError::Storage(_)));

        let listed = store.transactions().list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "kept");
        assert_eq!(backend.read().unwrap().transactions.len(), 1);
    }

    #[test]
    fn test_failed_batch_discards_partial_changes() {
        let store = RecordStore::in_memory();
        let result: PettyResult<()> = store.transact(|batch| {
            batch.add::<Transaction>(draft("partial", 100));
            Err(PettyError::Conflict("abort".into()))
        });

        assert!(result.is_err());
        assert_eq!(store.transactions().count().unwrap(), 0);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = RecordStore::in_memory();
        store
            .transact(|batch| batch.insert(Category::new("c1", "Office Supplies")))
            .unwrap();

        let err = store
            .transact(|batch| batch.insert(Category::new("c1", "Again")))
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_file_store_survives_reopen_and_audits() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PettyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let id = {
            let store = RecordStore::open_paths(&paths).unwrap();
            let vendor = store.vendors().add(NewVendor::named("City Transport")).unwrap();
            store.vendors().delete(&vendor.id).unwrap();
            store.vendors().add(NewVendor::named("Client A")).unwrap().id
        };

        let reopened = RecordStore::open_paths(&paths).unwrap();
        let vendors = reopened.vendors().list().unwrap();
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].id, id);

        let entries = reopened.audit_logger().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_stores_sharing_a_file_keep_each_others_writes() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PettyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let first = RecordStore::open_paths(&paths).unwrap();
        let second = RecordStore::open_paths(&paths).unwrap();
        first.transactions().add(draft("Courier", 6050)).unwrap();
        second.transactions().add(draft("Stamps", 300)).unwrap();

        let reopened = RecordStore::open_paths(&paths).unwrap();
        let descriptions: Vec<_> = reopened
            .transactions()
            .list()
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(descriptions, ["Stamps", "Courier"]);
    }

    #[test]
    fn test_concurrent_adds_get_distinct_ids() {
        let store = Arc::new(RecordStore::in_memory());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..10 {
                        store
                            .transactions()
                            .add(draft(&format!("{}-{}", i, j), 100))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ids: Vec<_> = store
            .transactions()
            .list()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids.len(), 80);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 80);
    }
}
