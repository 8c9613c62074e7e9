//! Storage layer for PettyFlow
//!
//! A single `RecordStore` owns the users, vendors, categories and
//! transactions. The durable copy is one JSON document replaced atomically
//! after every mutation.

pub mod file_io;
pub mod init;
pub mod record;
pub mod snapshot;
pub mod store;

pub use file_io::{read_json, remove_if_exists, write_json_atomic};
pub use init::{seed_demo_data, seed_reference_data};
pub use record::Record;
pub use snapshot::{JsonFileBackend, MemoryBackend, Snapshot, SnapshotBackend};
pub use store::{Batch, RecordStore, Repository};
