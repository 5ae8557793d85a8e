//! # Status Publisher
//!
//! Best-effort hand-off of snapshots from trackers to the collector queue.
//!
//! ## Backpressure
//!
//! The queue is bounded. When it is full, or the collector is gone, the
//! snapshot is dropped and counted. `publish` never waits, so it may be
//! called from async tasks and plain threads alike.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use pfps_common::StatusSnapshot;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

/// Receiving half of the status queue, owned by the collector.
pub type SnapshotReceiver = mpsc::Receiver<StatusSnapshot>;

/// Result of one [`StatusPublisher::publish`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Queued,
    /// Queue at capacity.
    DroppedFull,
    /// Collector receiver dropped.
    DroppedClosed,
}

/// Creates the bounded multi-producer/single-consumer status queue.
///
/// A capacity of zero is raised to one.
pub fn status_queue(capacity: usize) -> (StatusPublisher, SnapshotReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let publisher = StatusPublisher {
        tx,
        dropped: Arc::new(AtomicU64::new(0)),
    };
    (publisher, rx)
}

/// Cloneable sending side of the status queue. All clones share one
/// `dropped` counter.
#[derive(Debug, Clone)]
pub struct StatusPublisher {
    tx: mpsc::Sender<StatusSnapshot>,
    dropped: Arc<AtomicU64>,
}

impl StatusPublisher {
    pub fn publish(&self, snapshot: StatusSnapshot) -> PublishOutcome {
        match self.tx.try_send(snapshot) {
            Ok(()) => PublishOutcome::Queued,
            Err(TrySendError::Full(snapshot)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!(node = %snapshot.node_name, "status queue full, dropping update");
                PublishOutcome::DroppedFull
            }
            Err(TrySendError::Closed(snapshot)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!(node = %snapshot.node_name, "status collector gone, dropping update");
                PublishOutcome::DroppedClosed
            }
        }
    }

    /// Snapshots dropped so far across every clone of this publisher.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snap(node: &str) -> StatusSnapshot {
        StatusSnapshot {
            node_name: node.to_string(),
            fingerprint_expected: String::new(),
            fingerprint_computed: String::new(),
            workloads: Vec::new(),
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn test_publish_queues_in_order() {
        let (publisher, mut rx) = status_queue(4);
        assert_eq!(publisher.publish(snap("a")), PublishOutcome::Queued);
        assert_eq!(publisher.publish(snap("b")), PublishOutcome::Queued);

        assert_eq!(rx.try_recv().expect("first").node_name, "a");
        assert_eq!(rx.try_recv().expect("second").node_name, "b");
        assert_eq!(publisher.dropped(), 0);
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let (publisher, mut rx) = status_queue(2);
        let other = publisher.clone();

        assert_eq!(publisher.publish(snap("a")), PublishOutcome::Queued);
        assert_eq!(other.publish(snap("b")), PublishOutcome::Queued);
        assert_eq!(publisher.publish(snap("c")), PublishOutcome::DroppedFull);
        assert_eq!(other.publish(snap("d")), PublishOutcome::DroppedFull);

        assert_eq!(publisher.dropped(), 2);
        assert_eq!(other.dropped(), 2);

        // Queue still holds the first two, untouched by the drops.
        assert_eq!(rx.try_recv().expect("a").node_name, "a");
        assert_eq!(rx.try_recv().expect("b").node_name, "b");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_queue_drops() {
        let (publisher, rx) = status_queue(2);
        drop(rx);

        assert!(publisher.is_closed());
        assert_eq!(publisher.publish(snap("a")), PublishOutcome::DroppedClosed);
        assert_eq!(publisher.dropped(), 1);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let (publisher, mut rx) = status_queue(0);
        assert_eq!(publisher.publish(snap("a")), PublishOutcome::Queued);
        assert_eq!(publisher.publish(snap("b")), PublishOutcome::DroppedFull);
        assert!(rx.try_recv().is_ok());
    }
}
