//! # Fingerprint State
//!
//! Per-evaluation bookkeeping for one pod-fingerprint comparison.
//!
//! ## Lifecycle
//!
//! ```text
//! start(n) ──▶ add(ns, name)* ──▶ sign(computed) ──▶ check(expected)
//!    ▲                                                      │
//!    └──────────────────── reuse ───────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - Workloads keep insertion order; duplicates are kept as-is.
//! - `expected_count` is informational only. Adding more or fewer
//!   workloads than announced is a diagnostic signal, never an error.
//! - No operation fails.

use std::fmt::Write as _;

use crate::workload::WorkloadIdentity;

// ════════════════════════════════════════════════════════════════════════════════
// FINGERPRINT STATE
// ════════════════════════════════════════════════════════════════════════════════

/// Mutable state owned by exactly one tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintState {
    /// Number of workloads the caller announced in `start`.
    expected_count: usize,
    /// Workloads in the order they were fed to the fingerprint.
    workloads: Vec<WorkloadIdentity>,
    /// Signature computed locally from `workloads`.
    computed: String,
    /// Signature supplied by the other observer.
    expected: String,
}

impl FingerprintState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field and records the announced workload count.
    pub fn start(&mut self, expected_count: usize) {
        self.expected_count = expected_count;
        self.workloads.clear();
        self.computed.clear();
        self.expected.clear();
    }

    pub fn add(&mut self, namespace: impl Into<String>, name: impl Into<String>) {
        self.workloads.push(WorkloadIdentity::new(namespace, name));
    }

    pub fn sign(&mut self, computed: impl Into<String>) {
        self.computed = computed.into();
    }

    pub fn check(&mut self, expected: impl Into<String>) {
        self.expected = expected.into();
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    pub fn workloads(&self) -> &[WorkloadIdentity] {
        &self.workloads
    }

    pub fn computed(&self) -> &str {
        &self.computed
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// `true` when both signatures are present and equal.
    pub fn is_match(&self) -> bool {
        signatures_match(&self.computed, &self.expected)
    }

    /// Renders the human-readable trace. See [`render_trace`].
    pub fn repr(&self) -> String {
        render_trace(&self.workloads, &self.computed, &self.expected)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// RENDERING
// ════════════════════════════════════════════════════════════════════════════════

/// Renders a fingerprint trace.
///
/// ```text
/// > processing 2 pods
/// + ns-1/pod-1
/// + ns-2/pod-2
/// = <computed>
/// V <expected>
/// ```
///
/// The header counts the workloads actually listed, not the count
/// announced in `start`.
pub fn render_trace(workloads: &[WorkloadIdentity], computed: &str, expected: &str) -> String {
    let mut out = String::with_capacity(32 + workloads.len() * 32);
    let _ = writeln!(out, "> processing {} pods", workloads.len());
    for w in workloads {
        let _ = writeln!(out, "+ {}", w);
    }
    let _ = writeln!(out, "= {}", computed);
    let _ = writeln!(out, "V {}", expected);
    out
}

pub(crate) fn signatures_match(computed: &str, expected: &str) -> bool {
    !computed.is_empty() && computed == expected
}

// ════════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repr_exact_format() {
        let mut st = FingerprintState::new();
        st.start(2);
        st.add("ns-1", "pod-1");
        st.add("ns-2", "pod-2");
        st.sign("S");
        st.check("C");

        assert_eq!(
            st.repr(),
            "> processing 2 pods\n+ ns-1/pod-1\n+ ns-2/pod-2\n= S\nV C\n"
        );
    }

    #[test]
    fn test_repr_counts_added_not_announced() {
        let mut st = FingerprintState::new();
        st.start(3);
        st.add("ns-1", "pod-1");
        st.add("ns-2", "pod-2");
        st.sign("random-value-sign");
        st.check("random-value-chk");

        assert_eq!(st.expected_count(), 3);
        assert_eq!(
            st.repr(),
            "> processing 2 pods\n+ ns-1/pod-1\n+ ns-2/pod-2\n= random-value-sign\nV random-value-chk\n"
        );
    }

    #[test]
    fn test_repr_empty_state() {
        let st = FingerprintState::new();
        assert_eq!(st.repr(), "> processing 0 pods\n= \nV \n");
    }

    #[test]
    fn test_add_keeps_duplicates_in_order() {
        let mut st = FingerprintState::new();
        st.start(1);
        st.add("ns", "b");
        st.add("ns", "a");
        st.add("ns", "b");

        let names: Vec<&str> = st.workloads().iter().map(|w| w.name()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_start_resets_previous_evaluation() {
        let mut st = FingerprintState::new();
        st.start(1);
        st.add("ns", "old");
        st.sign("old-sig");
        st.check("old-exp");

        st.start(5);
        assert_eq!(st.expected_count(), 5);
        assert!(st.workloads().is_empty());
        assert_eq!(st.computed(), "");
        assert_eq!(st.expected(), "");
    }

    #[test]
    fn test_is_match() {
        let mut st = FingerprintState::new();
        assert!(!st.is_match());

        st.sign("pfp0v001abc");
        st.check("pfp0v001abc");
        assert!(st.is_match());

        st.check("pfp0v001def");
        assert!(!st.is_match());
    }
}
