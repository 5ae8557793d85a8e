//! # Status Collector
//!
//! The single consumer of the status queue. Every dequeued snapshot gets
//! the next sequence number and the current wall-clock time, then goes to
//! the [`RecordStore`].
//!
//! ## Modes
//!
//! - `Persist`: the base directory existed at startup; records are written.
//! - `Discard`: the base directory was missing (typically not mounted into
//!   the container). Snapshots are still dequeued so publishers never see
//!   a full queue, but nothing is written for the lifetime of the loop.
//!
//! ## Invariants
//!
//! - Sequence numbers start at 1 and grow by exactly 1 per dequeued
//!   snapshot, whether the snapshot is then written, fails, or is
//!   discarded.
//! - Write failures are logged and never stop the loop.
//! - Cancellation is checked before every dequeue; snapshots still queued
//!   at that point are lost.

use std::path::Path;

use chrono::Utc;
use pfps_common::{DurableRecord, StatusSnapshot};
use pfps_storage::{JsonFileStore, RecordStore};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::publisher::SnapshotReceiver;

// ════════════════════════════════════════════════════════════════════════════════
// REPORT / MODE
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorMode {
    Persist,
    Discard,
}

/// Counters returned when the collector loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorReport {
    /// Snapshots dequeued.
    pub received: u64,
    pub written: u64,
    /// Writes that returned an error.
    pub failed: u64,
    /// Snapshots dequeued in discard mode.
    pub discarded: u64,
    /// Last sequence number handed out, 0 if none.
    pub last_seq_no: u64,
}

// ════════════════════════════════════════════════════════════════════════════════
// STATUS COLLECTOR
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct StatusCollector<S: RecordStore> {
    store: S,
    mode: CollectorMode,
    /// Last sequence number handed out.
    seq_no: u64,
    report: CollectorReport,
}

impl<S: RecordStore> StatusCollector<S> {
    /// Picks the mode from `base_directory`, which is checked once here.
    pub fn new(store: S, base_directory: &Path) -> Self {
        let mode = if base_directory.is_dir() {
            CollectorMode::Persist
        } else {
            info!(
                "base directory not found, will discard everything (baseDirectory={})",
                base_directory.display()
            );
            CollectorMode::Discard
        };
        Self::with_mode(store, mode)
    }

    pub fn with_mode(store: S, mode: CollectorMode) -> Self {
        Self {
            store,
            mode,
            seq_no: 0,
            report: CollectorReport::default(),
        }
    }

    pub fn mode(&self) -> CollectorMode {
        self.mode
    }

    pub fn report(&self) -> CollectorReport {
        self.report
    }

    /// Processes one dequeued snapshot.
    pub fn handle(&mut self, snapshot: StatusSnapshot) {
        self.seq_no += 1;
        self.report.received += 1;
        self.report.last_seq_no = self.seq_no;

        if self.mode == CollectorMode::Discard {
            self.report.discarded += 1;
            return;
        }

        let key = snapshot.node_name.clone();
        let record = DurableRecord::from_snapshot(snapshot, self.seq_no, Utc::now());
        match self.store.write(&key, &record) {
            Ok(()) => {
                self.report.written += 1;
            }
            Err(e) => {
                self.report.failed += 1;
                warn!("failed to persist status for node {} (seqNo={}): {}", key, self.seq_no, e);
            }
        }
    }

    /// Drains `updates` until cancelled or until every publisher is gone.
    ///
    /// Cancellation is `true` on `shutdown` or the sender being dropped.
    pub async fn run(
        mut self,
        mut shutdown: watch::Receiver<bool>,
        mut updates: SnapshotReceiver,
    ) -> CollectorReport {
        debug!("status update loop started");

        if !*shutdown.borrow() {
            loop {
                tokio::select! {
                    biased;

                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            debug!("status update loop cancelled");
                            break;
                        }
                    }
                    maybe = updates.recv() => {
                        match maybe {
                            Some(snapshot) => self.handle(snapshot),
                            None => {
                                debug!("all status publishers dropped");
                                break;
                            }
                        }
                    }
                }
            }
        }

        debug!(
            "status update loop finished: received={} written={} failed={} discarded={}",
            self.report.received, self.report.written, self.report.failed, self.report.discarded
        );
        self.report
    }
}

/// Runs a collector writing JSON files into `base_directory`.
pub async fn run_collector(
    shutdown: watch::Receiver<bool>,
    base_directory: &Path,
    updates: SnapshotReceiver,
) -> CollectorReport {
    let store = JsonFileStore::new(base_directory);
    StatusCollector::new(store, base_directory)
        .run(shutdown, updates)
        .await
}

// ════════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════════
