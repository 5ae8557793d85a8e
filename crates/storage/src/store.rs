use std::fmt::Debug;
use std::sync::Arc;

use pfps_common::DurableRecord;

use crate::error::StoreError;

/// One-record-per-key persistence used by the status collector.
///
/// Keys are node names; implementations decide how they map to storage.
/// A successful `write` replaces the previous record for the key as a
/// whole, so readers never observe a half-written record.
pub trait RecordStore: Debug + Send + Sync + 'static {
    fn write(&self, key: &str, record: &DurableRecord) -> Result<(), StoreError>;
    fn read(&self, key: &str) -> Result<DurableRecord, StoreError>;
}

impl<T: RecordStore> RecordStore for Arc<T> {
    fn write(&self, key: &str, record: &DurableRecord) -> Result<(), StoreError> {
        (**self).write(key, record)
    }

    fn read(&self, key: &str) -> Result<DurableRecord, StoreError> {
        (**self).read(key)
    }
}
