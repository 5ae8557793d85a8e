//! # Local Filesystem Record Store
//!
//! One JSON file per node inside a single directory.
//!
//! ## File Layout
//!
//! ```text
//! {dir}/
//! ├── node_example_com.json      # record for "node.example.com"
//! ├── worker-0.json
//! └── worker-0XXXXXX.tmp         # in-flight write, never read
//! ```
//!
//! Node names are usually DNS names. Every `.` becomes `_` so the only dot
//! left in a file name is the one before the extension.
//!
//! ## Write Protocol
//!
//! 1. Encode the record in memory.
//! 2. Create a unique temp file inside `dir` (same filesystem as the target).
//! 3. Write, flush, `sync_all`, close.
//! 4. `rename` over `{sanitized}.json`.
//!
//! The rename is the only step that makes new content visible, so a reader
//! opening the canonical name sees either the previous record or the new
//! one in full. A failed write leaves no temp file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pfps_common::DurableRecord;
use tracing::debug;

use crate::error::StoreError;
use crate::store::RecordStore;

/// Extension of committed records.
pub const RECORD_EXTENSION: &str = "json";
/// Extension of temp files; never matched by readers.
const TEMP_SUFFIX: &str = ".tmp";

// ════════════════════════════════════════════════════════════════════════════════
// KEY MAPPING
// ════════════════════════════════════════════════════════════════════════════════

/// Replaces every literal `.` with `_`.
pub fn sanitize_key(key: &str) -> String {
    key.replace('.', "_")
}

/// Canonical path of the record for `key` inside `dir`.
pub fn record_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{}", sanitize_key(key), RECORD_EXTENSION))
}

// ════════════════════════════════════════════════════════════════════════════════
// WRITE / READ
// ════════════════════════════════════════════════════════════════════════════════

/// Atomically writes `record` as `{dir}/{sanitize(key)}.json`.
pub fn write_record(dir: &Path, key: &str, record: &DurableRecord) -> Result<(), StoreError> {
    let name = sanitize_key(key);
    let dest = dir.join(format!("{}.{}", name, RECORD_EXTENSION));

    let mut payload = serde_json::to_vec(record).map_err(StoreError::Serialize)?;
    payload.push(b'\n');

    let mut tmp = tempfile::Builder::new()
        .prefix(&name)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| StoreError::io(dir, e))?;

    tmp.write_all(&payload).map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.flush().map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| StoreError::io(tmp.path(), e))?;

    // Closes the handle; the path is still removed on drop if the rename fails.
    let tmp_path = tmp.into_temp_path();
    tmp_path
        .persist(&dest)
        .map_err(|e| StoreError::io(&dest, e.error))?;

    debug!("wrote status record {} (seqNo={})", dest.display(), record.seq_no);
    Ok(())
}

/// Reads the record stored for `key`.
///
/// ## Errors
///
/// - [`StoreError::NotFound`] if no file exists for the key.
/// - [`StoreError::CorruptRecord`] if the file does not decode.
/// - [`StoreError::Io`] for any other read failure.
pub fn read_record(dir: &Path, key: &str) -> Result<DurableRecord, StoreError> {
    read_path(record_path(dir, key))
}

fn read_path(path: PathBuf) -> Result<DurableRecord, StoreError> {
    let data = match fs::read(&path) {
        Ok(d) => d,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound { path });
        }
        Err(e) => return Err(StoreError::Io { path, source: e }),
    };
    serde_json::from_slice(&data).map_err(|source| StoreError::CorruptRecord { path, source })
}

/// Lists every committed record in `dir`, sorted by file stem.
///
/// Each entry carries its own decode result so one corrupt file does not
/// hide the others. Temp files and non-JSON entries are skipped.
pub fn list_records(dir: &Path) -> Result<Vec<(String, Result<DurableRecord, StoreError>)>, StoreError> {
    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        paths.push((stem.to_string(), path));
    }
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(paths
        .into_iter()
        .map(|(stem, path)| (stem, read_path(path)))
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════════
// JSON FILE STORE
// ════════════════════════════════════════════════════════════════════════════════

/// [`RecordStore`] backed by a directory of JSON files.
///
/// The directory is never created here: its absence is how operators
/// turn persistence off, and the collector checks for it at startup.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `true` if the base directory exists and is a directory.
    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    pub fn list(&self) -> Result<Vec<(String, Result<DurableRecord, StoreError>)>, StoreError> {
        list_records(&self.dir)
    }
}

impl RecordStore for JsonFileStore {
    fn write(&self, key: &str, record: &DurableRecord) -> Result<(), StoreError> {
        write_record(&self.dir, key, record)
    }

    fn read(&self, key: &str) -> Result<DurableRecord, StoreError> {
        read_record(&self.dir, key)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════════
