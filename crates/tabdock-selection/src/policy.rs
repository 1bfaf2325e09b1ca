//! Selection policies
//!
//! A policy is a pure predicate over a request. It may read external state
//! (authentication, feature flags) but never mutates selection.

use parking_lot::RwLock;
use std::sync::Arc;

use tabdock_routes::{SelectionDecision, SelectionRequest};

pub trait SelectionPolicy: Send {
    fn evaluate(&self, request: &SelectionRequest) -> SelectionDecision;
}

impl<F> SelectionPolicy for F
where
    F: Fn(&SelectionRequest) -> SelectionDecision + Send,
{
    fn evaluate(&self, request: &SelectionRequest) -> SelectionDecision {
        self(request)
    }
}

/// Allows every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl SelectionPolicy for AllowAll {
    fn evaluate(&self, _request: &SelectionRequest) -> SelectionDecision {
        SelectionDecision::Allow
    }
}

/// Denies routes that require authentication while the shared flag is unset.
#[derive(Debug, Default)]
pub struct AuthenticationGate {
    authenticated: Arc<RwLock<bool>>,
}

impl AuthenticationGate {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated: Arc::new(RwLock::new(authenticated)),
        }
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        *self.authenticated.write() = authenticated;
        tracing::debug!(authenticated, "Authentication state changed");
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.read()
    }
}

impl Clone for AuthenticationGate {
    fn clone(&self) -> Self {
        Self {
            authenticated: Arc::clone(&self.authenticated),
        }
    }
}

impl SelectionPolicy for AuthenticationGate {
    fn evaluate(&self, request: &SelectionRequest) -> SelectionDecision {
        SelectionDecision::from_allowed(
            !request.route.requires_authentication() || self.is_authenticated(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabdock_routes::{PageHandle, Route, TabItemConfiguration, Trigger};

    fn request(route: Route) -> SelectionRequest {
        SelectionRequest::new(0, 1, Trigger::User, route)
    }

    #[test]
    fn test_authentication_gate() {
        let gate = AuthenticationGate::new(false);
        let handle = gate.clone();

        let open = Route::new(TabItemConfiguration::new("Home"), PageHandle::new());
        let gated = Route::new(
            TabItemConfiguration::new("Account").authenticated(),
            PageHandle::new(),
        );

        assert_eq!(gate.evaluate(&request(open)), SelectionDecision::Allow);
        assert_eq!(gate.evaluate(&request(gated.clone())), SelectionDecision::Deny);

        // Clones share the flag
        handle.set_authenticated(true);
        assert_eq!(gate.evaluate(&request(gated)), SelectionDecision::Allow);
    }

    #[test]
    fn test_closure_policy() {
        let only_forward =
            |r: &SelectionRequest| SelectionDecision::from_allowed(r.to_index >= r.from_index);
        let route = Route::new(TabItemConfiguration::new("A"), PageHandle::new());

        assert!(only_forward
            .evaluate(&SelectionRequest::new(0, 2, Trigger::User, route.clone()))
            .is_allowed());
        assert!(!only_forward
            .evaluate(&SelectionRequest::new(2, 0, Trigger::User, route))
            .is_allowed());
    }
}
