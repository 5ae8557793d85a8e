//! # PFPS Common Crate
//!
//! Shared data model for the pod-fingerprint status pipeline.
//!
//! ## Modules
//! - `workload`: `(namespace, name)` identity of one observed workload
//! - `fingerprint`: mutable per-evaluation bookkeeping and trace rendering
//! - `snapshot`: immutable copy captured at comparison time
//! - `record`: on-disk representation with sequence number and write time
//! - `config`: pipeline configuration (environment + TOML)
//!
//! ## Data Flow
//! ```text
//! ┌──────────────────┐  check()  ┌────────────────┐  collector  ┌───────────────┐
//! │ FingerprintState │──────────▶│ StatusSnapshot │────────────▶│ DurableRecord │
//! │  (one per eval)  │   clone   │  (owned copy)  │ seq + time  │  (one / node) │
//! └──────────────────┘           └────────────────┘             └───────────────┘
//! ```

pub mod config;
pub mod fingerprint;
pub mod record;
pub mod snapshot;
pub mod workload;

pub use config::{ConfigError, PipelineConfig};
pub use fingerprint::{render_trace, FingerprintState};
pub use record::DurableRecord;
pub use snapshot::StatusSnapshot;
pub use workload::WorkloadIdentity;
