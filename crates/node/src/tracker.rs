//! # Fingerprint Tracker
//!
//! Records, for one node and one scheduling evaluation, which workloads
//! went into the pod fingerprint and how the computed signature compared
//! with the one reported for the node.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut tracker = pipeline.tracker("worker-0.example.com");
//! tracker.start(pods.len());
//! for pod in &pods {
//!     tracker.add(&pod.namespace, &pod.name);
//! }
//! tracker.sign(&computed);
//! tracker.check(&expected); // publishes a snapshot if a publisher is bound
//! ```
//!
//! ## Thread Safety
//!
//! `FingerprintTracker` is `Send` and has no interior mutability; one
//! instance belongs to one evaluation at a time.

use pfps_common::{FingerprintState, StatusSnapshot, WorkloadIdentity};

use crate::publisher::StatusPublisher;

// ════════════════════════════════════════════════════════════════════════════════
// FINGERPRINT TRACKER
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct FingerprintTracker {
    node_name: String,
    state: FingerprintState,
    /// `None` when status dumping is disabled.
    publisher: Option<StatusPublisher>,
}

impl FingerprintTracker {
    /// Creates a tracker that never publishes.
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            state: FingerprintState::new(),
            publisher: None,
        }
    }

    pub fn with_publisher(node_name: impl Into<String>, publisher: StatusPublisher) -> Self {
        Self {
            publisher: Some(publisher),
            ..Self::new(node_name)
        }
    }

    pub fn bind(&mut self, publisher: Option<StatusPublisher>) {
        self.publisher = publisher;
    }

    pub fn is_bound(&self) -> bool {
        self.publisher.is_some()
    }

    pub fn start(&mut self, expected_count: usize) {
        self.state.start(expected_count);
    }

    pub fn add(&mut self, namespace: impl Into<String>, name: impl Into<String>) {
        self.state.add(namespace, name);
    }

    pub fn sign(&mut self, computed: impl Into<String>) {
        self.state.sign(computed);
    }

    /// Records the expected signature, then publishes a snapshot.
    ///
    /// Publishing is best effort and never blocks; see
    /// [`StatusPublisher::publish`].
    pub fn check(&mut self, expected: impl Into<String>) {
        self.state.check(expected);

        if let Some(publisher) = &self.publisher {
            publisher.publish(self.snapshot());
        }
    }

    /// Owned copy of the current state, stamped with the wall clock.
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot::capture(&self.node_name, &self.state)
    }

    pub fn repr(&self) -> String {
        self.state.repr()
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn expected_count(&self) -> usize {
        self.state.expected_count()
    }

    pub fn workloads(&self) -> &[WorkloadIdentity] {
        self.state.workloads()
    }

    pub fn is_match(&self) -> bool {
        self.state.is_match()
    }
}

const _: () = {
    fn assert_send<T: Send>() {}
    fn check() { assert_send::<FingerprintTracker>(); }
    let _ = check;
};

// ════════════════════════════════════════════════════════════════════════════════
// TESTS
// ════════════════════════════════════════════════════════════════════════════════
