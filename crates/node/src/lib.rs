//! # PFPS Node Crate
//!
//! Producer and consumer sides of the pod-fingerprint status pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                           StatusPipeline                              │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                       │
//! │  ┌────────────────────┐   check()   ┌─────────────────┐               │
//! │  │ FingerprintTracker │────────────▶│ StatusPublisher │──┐            │
//! │  │  (one / evaluation)│  snapshot   │   (try_send)    │  │            │
//! │  └────────────────────┘             └─────────────────┘  │ bounded    │
//! │                                                          │ mpsc       │
//! │                                                          ▼            │
//! │                                   ┌─────────────────────────────┐     │
//! │                                   │       StatusCollector       │     │
//! │                                   │  seqNo + lastWrite stamping │     │
//! │                                   └──────────────┬──────────────┘     │
//! │                                                  │ RecordStore        │
//! │                                                  ▼                    │
//! │                                     {status_dir}/{node_name}.json     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Best effort**: diagnostics never block or fail a scheduling cycle.
//!    A full queue drops the snapshot.
//! 2. **Single writer**: only the collector writes, so the store needs no
//!    locking.
//! 3. **No globals**: the hosting process builds one [`StatusPipeline`]
//!    and hands trackers out of it.

pub mod collector;
pub mod pipeline;
pub mod publisher;
pub mod tracker;

pub use collector::{run_collector, CollectorMode, CollectorReport, StatusCollector};
pub use pipeline::{PipelineHandle, StatusPipeline};
pub use publisher::{status_queue, PublishOutcome, SnapshotReceiver, StatusPublisher};
pub use tracker::FingerprintTracker;
