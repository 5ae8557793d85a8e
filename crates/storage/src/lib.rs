//! pfps-storage
//!
//! Durable, crash-consistent storage of the latest fingerprint status per
//! node: one JSON file per node, replaced atomically on every write.

pub mod error;
pub mod localfs;
pub mod store;

pub use crate::error::StoreError;
pub use crate::localfs::{
    list_records, read_record, record_path, sanitize_key, write_record, JsonFileStore,
};
pub use crate::store::RecordStore;
