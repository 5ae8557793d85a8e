//! # Durable Record
//!
//! On-disk shape of one node's latest fingerprint status.
//!
//! ## Wire Format
//!
//! ```text
//! {
//!   "nodeName": "node.example.com",
//!   "fingerprintExpected": "...",
//!   "fingerprintComputed": "...",
//!   "pods": [{"Namespace": "ns-1", "Name": "pod-1"}],
//!   "lastWrite": "2006-01-02T15:04:05Z",
//!   "seqNo": 7
//! }
//! ```
//!
//! `lastWrite` is RFC 3339 and round-trips at full precision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::{render_trace, signatures_match};
use crate::snapshot::StatusSnapshot;
use crate::workload::WorkloadIdentity;

/// A [`StatusSnapshot`] stamped by the collector with its write time and
/// sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurableRecord {
    pub node_name: String,
    pub fingerprint_expected: String,
    pub fingerprint_computed: String,
    #[serde(default)]
    pub pods: Vec<WorkloadIdentity>,
    pub last_write: DateTime<Utc>,
    /// Per-process write order, starting at 1.
    pub seq_no: u64,
}

impl DurableRecord {
    /// Consumes a snapshot; the capture time is superseded by `last_write`.
    pub fn from_snapshot(snapshot: StatusSnapshot, seq_no: u64, last_write: DateTime<Utc>) -> Self {
        Self {
            node_name: snapshot.node_name,
            fingerprint_expected: snapshot.fingerprint_expected,
            fingerprint_computed: snapshot.fingerprint_computed,
            pods: snapshot.workloads,
            last_write,
            seq_no,
        }
    }

    pub fn is_match(&self) -> bool {
        signatures_match(&self.fingerprint_computed, &self.fingerprint_expected)
    }

    pub fn repr(&self) -> String {
        render_trace(&self.pods, &self.fingerprint_computed, &self.fingerprint_expected)
    }
}
