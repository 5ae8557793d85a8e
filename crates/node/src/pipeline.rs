//! # Status Pipeline
//!
//! Explicit owner of the status queue and the collector task. Built once
//! from [`PipelineConfig`] by the hosting process and passed to whatever
//! creates trackers; there is no global state.
//!
//! ```text
//!  tracker ─┐
//!  tracker ─┼─▶ StatusPublisher ──[bounded queue]──▶ StatusCollector ──▶ {dir}/{node}.json
//!  tracker ─┘        (try_send)                         (one task)
//! ```

use std::path::PathBuf;

use pfps_common::PipelineConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::collector::{run_collector, CollectorReport};
use crate::publisher::{status_queue, SnapshotReceiver, StatusPublisher};
use crate::tracker::FingerprintTracker;

// ════════════════════════════════════════════════════════════════════════════════
// STATUS PIPELINE
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct StatusPipeline {
    status_dir: Option<PathBuf>,
    publisher: Option<StatusPublisher>,
    /// Taken by the first `spawn`.
    receiver: Option<SnapshotReceiver>,
}

impl StatusPipeline {
    /// Enabled iff `cfg.status_dir` is set.
    pub fn from_config(cfg: &PipelineConfig) -> Self {
        match &cfg.status_dir {
            Some(dir) => {
                let (publisher, receiver) = status_queue(cfg.queue_capacity);
                Self {
                    status_dir: Some(dir.clone()),
                    publisher: Some(publisher),
                    receiver: Some(receiver),
                }
            }
            None => Self::disabled(),
        }
    }

    /// A pipeline whose trackers never publish.
    pub fn disabled() -> Self {
        Self {
            status_dir: None,
            publisher: None,
            receiver: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.publisher.is_some()
    }

    pub fn status_dir(&self) -> Option<&PathBuf> {
        self.status_dir.as_ref()
    }

    pub fn publisher(&self) -> Option<StatusPublisher> {
        self.publisher.clone()
    }

    /// Snapshots dropped because the queue was full or closed.
    pub fn dropped(&self) -> u64 {
        self.publisher.as_ref().map_or(0, StatusPublisher::dropped)
    }

    /// New tracker for `node_name`, bound to this pipeline's publisher.
    pub fn tracker(&self, node_name: impl Into<String>) -> FingerprintTracker {
        let mut tracker = FingerprintTracker::new(node_name);
        tracker.bind(self.publisher());
        tracker
    }

    /// Spawns the collector on the current tokio runtime.
    ///
    /// Returns `None` when the pipeline is disabled or was already spawned.
    /// Must be called from within a runtime.
    pub fn spawn(&mut self) -> Option<PipelineHandle> {
        let dir = self.status_dir.clone()?;
        let receiver = self.receiver.take()?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!("starting status collector (statusDirectory={})", dir.display());
        let join = tokio::spawn(async move { run_collector(shutdown_rx, &dir, receiver).await });

        Some(PipelineHandle {
            shutdown: shutdown_tx,
            join,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// PIPELINE HANDLE
// ════════════════════════════════════════════════════════════════════════════════

/// Controls a spawned collector.
///
/// Dropping the handle cancels the collector, like [`shutdown`](Self::shutdown).
#[derive(Debug)]
pub struct PipelineHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<CollectorReport>,
}

impl PipelineHandle {
    /// Asks the collector to stop. Queued snapshots are not drained.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits for the collector. `None` if the task panicked or was aborted.
    pub async fn join(self) -> Option<CollectorReport> {
        let PipelineHandle { shutdown, join } = self;
        let result = join.await;
        drop(shutdown);
        match result {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("status collector task failed: {}", e);
                None
            }
        }
    }

    pub async fn shutdown_and_join(self) -> Option<CollectorReport> {
        self.shutdown();
        self.join().await
    }
}
