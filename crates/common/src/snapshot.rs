//! Immutable status snapshot captured when a fingerprint is checked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fingerprint::{render_trace, signatures_match, FingerprintState};
use crate::workload::WorkloadIdentity;

/// Owned copy of a [`FingerprintState`] at comparison time.
///
/// Every field is a fresh allocation: editing a snapshot never reaches
/// back into the tracker it came from, and later tracker updates never
/// show up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub node_name: String,
    pub fingerprint_expected: String,
    pub fingerprint_computed: String,
    #[serde(rename = "pods", default)]
    pub workloads: Vec<WorkloadIdentity>,
    pub captured_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Clones `state` into a snapshot stamped with the current wall clock.
    pub fn capture(node_name: &str, state: &FingerprintState) -> Self {
        Self::capture_at(node_name, state, Utc::now())
    }

    pub fn capture_at(node_name: &str, state: &FingerprintState, captured_at: DateTime<Utc>) -> Self {
        Self {
            node_name: node_name.to_string(),
            fingerprint_expected: state.expected().to_string(),
            fingerprint_computed: state.computed().to_string(),
            workloads: state.workloads().to_vec(),
            captured_at,
        }
    }

    pub fn is_match(&self) -> bool {
        signatures_match(&self.fingerprint_computed, &self.fingerprint_expected)
    }

    pub fn repr(&self) -> String {
        render_trace(
            &self.workloads,
            &self.fingerprint_computed,
            &self.fingerprint_expected,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> FingerprintState {
        let mut st = FingerprintState::new();
        st.start(2);
        st.add("ns-1", "pod-1");
        st.add("ns-2", "pod-2");
        st.sign("random-value-sign");
        st.check("random-value-chk");
        st
    }

    #[test]
    fn test_capture_copies_all_fields() {
        let st = sample_state();
        let snap = StatusSnapshot::capture("test-node-2", &st);

        assert_eq!(snap.node_name, "test-node-2");
        assert_eq!(snap.fingerprint_computed, "random-value-sign");
        assert_eq!(snap.fingerprint_expected, "random-value-chk");
        assert_eq!(snap.workloads, st.workloads());
        assert_eq!(snap.repr(), st.repr());
    }

    #[test]
    fn test_snapshot_edit_does_not_reach_state() {
        let st = sample_state();
        let mut snap = StatusSnapshot::capture("n", &st);
        snap.workloads.push(WorkloadIdentity::new("ns-3", "pod-3"));

        assert_eq!(snap.workloads.len(), 3);
        assert_eq!(st.workloads().len(), 2);
        assert!(snap.repr().starts_with("> processing 3 pods\n"));
        assert!(st.repr().starts_with("> processing 2 pods\n"));
    }

    #[test]
    fn test_state_edit_does_not_reach_snapshot() {
        let mut st = sample_state();
        let snap = StatusSnapshot::capture("n", &st);
        st.add("ns-3", "pod-3");
        st.start(0);

        assert_eq!(snap.workloads.len(), 2);
        assert_eq!(snap.fingerprint_computed, "random-value-sign");
    }
}
