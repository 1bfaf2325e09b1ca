//! The policy/commit/deny seam between the coordinator and its host.

use tabdock_routes::{SelectionDecision, SelectionRequest};

use crate::policy::SelectionPolicy;

/// Supplied at construction and owned by the coordinator.
///
/// `decide` runs synchronously and exactly once per in-range request.
/// When `commit` runs the coordinator's selection already equals
/// `request.to_index`.
pub trait SelectionHandler {
    fn decide(&mut self, request: &SelectionRequest) -> SelectionDecision;

    fn commit(&mut self, request: &SelectionRequest);

    fn deny(&mut self, request: &SelectionRequest);
}

type Callback = Box<dyn FnMut(&SelectionRequest) + Send>;

/// Closure-backed handler: a policy plus commit and deny callbacks.
pub struct SelectionCallbacks {
    policy: Box<dyn SelectionPolicy>,
    on_commit: Callback,
    on_deny: Callback,
}

impl SelectionCallbacks {
    pub fn new<P>(policy: P) -> Self
    where
        P: SelectionPolicy + 'static,
    {
        Self {
            policy: Box::new(policy),
            on_commit: Box::new(|_| {}),
            on_deny: Box::new(|_| {}),
        }
    }

    pub fn on_commit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SelectionRequest) + Send + 'static,
    {
        self.on_commit = Box::new(f);
        self
    }

    pub fn on_deny<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SelectionRequest) + Send + 'static,
    {
        self.on_deny = Box::new(f);
        self
    }
}

impl SelectionHandler for SelectionCallbacks {
    fn decide(&mut self, request: &SelectionRequest) -> SelectionDecision {
        self.policy.evaluate(request)
    }

    fn commit(&mut self, request: &SelectionRequest) {
        (self.on_commit)(request)
    }

    fn deny(&mut self, request: &SelectionRequest) {
        (self.on_deny)(request)
    }
}
