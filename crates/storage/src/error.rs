use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors returned by the durable store.
///
/// The collector logs and drops these; only readers see them.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the key.
    #[error("no status record at {path:?}")]
    NotFound { path: PathBuf },

    /// The file exists but does not decode as a record.
    #[error("corrupt status record at {path:?}: {source}")]
    CorruptRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be encoded.
    #[error("cannot encode status record: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Create, write, sync, rename or read failure.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::CorruptRecord { .. })
    }
}
