//! Selection Coordinator

use parking_lot::RwLock;
use std::sync::Arc;

use tabdock_routes::{Route, RouteTable, SelectionDecision, SelectionRequest, Trigger};

use crate::handler::SelectionHandler;

/// Read-only view of the coordinator's selected index.
///
/// Hooks hold a clone to observe the current selection; during `commit`
/// it already reports the new index.
#[derive(Debug)]
pub struct SelectionHandle {
    selected: Arc<RwLock<usize>>,
}

impl SelectionHandle {
    pub fn get(&self) -> usize {
        *self.selected.read()
    }
}

impl Clone for SelectionHandle {
    fn clone(&self) -> Self {
        Self {
            selected: Arc::clone(&self.selected),
        }
    }
}

pub struct SelectionCoordinator<H> {
    routes: RouteTable,
    /// Written only by `request_selection`, after an Allow
    selected: Arc<RwLock<usize>>,
    handler: H,
}

impl<H: SelectionHandler> SelectionCoordinator<H> {
    /// `initial_index` is clamped into the table so the selection is always valid.
    pub fn new(routes: RouteTable, initial_index: usize, handler: H) -> Self {
        let initial = if routes.contains_index(initial_index) {
            initial_index
        } else {
            tracing::warn!(
                initial_index,
                routes = routes.len(),
                "Initial index out of range, selecting first route"
            );
            0
        };

        Self {
            routes,
            selected: Arc::new(RwLock::new(initial)),
            handler,
        }
    }

    /// Evaluate and, if allowed, commit a selection.
    ///
    /// Returns `false` without invoking any hook when `to_index` resolves to
    /// no route. Re-selecting the current index still runs policy and commit.
    pub fn request_selection(&mut self, to_index: usize, trigger: Trigger) -> bool {
        let Some(route) = self.routes.route(to_index).cloned() else {
            tracing::debug!(to_index, trigger = %trigger, "Ignoring selection of unknown route");
            return false;
        };

        let request = SelectionRequest::new(self.selected_index(), to_index, trigger, route);

        match self.handler.decide(&request) {
            SelectionDecision::Deny => {
                tracing::debug!(
                    from = request.from_index,
                    to = request.to_index,
                    trigger = %trigger,
                    "Selection denied"
                );
                self.handler.deny(&request);
                false
            }
            SelectionDecision::Allow => {
                // Write lock is released before the hook runs.
                *self.selected.write() = to_index;

                tracing::debug!(
                    from = request.from_index,
                    to = request.to_index,
                    trigger = %trigger,
                    "Selection committed"
                );
                self.handler.commit(&request);
                true
            }
        }
    }

    pub fn selected_index(&self) -> usize {
        *self.selected.read()
    }

    pub fn selected_route(&self) -> &Route {
        // The selection is only ever set to an index validated against `routes`.
        &self.routes.routes()[self.selected_index()]
    }

    pub fn route(&self, index: usize) -> Option<&Route> {
        self.routes.route(index)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            selected: Arc::clone(&self.selected),
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::SelectionCallbacks;
    use crate::policy::{AllowAll, AuthenticationGate};
    use parking_lot::Mutex;
    use tabdock_routes::TabItemConfiguration;

    fn routes() -> RouteTable {
        RouteTable::from_configurations([
            TabItemConfiguration::new("Home"),
            TabItemConfiguration::new("Search"),
            TabItemConfiguration::new("Inbox").authenticated(),
            TabItemConfiguration::new("Profile"),
        ])
        .unwrap()
    }

    #[derive(Default, Clone)]
    struct Log {
        commits: Arc<Mutex<Vec<(usize, usize, Trigger)>>>,
        denies: Arc<Mutex<Vec<(usize, usize)>>>,
        observed: Arc<Mutex<Vec<usize>>>,
    }

    /// Handler recording every hook, reading the selection back through a handle.
    struct Recorder {
        policy: AuthenticationGate,
        log: Log,
        handle: Option<SelectionHandle>,
    }

    impl SelectionHandler for Recorder {
        fn decide(&mut self, request: &SelectionRequest) -> SelectionDecision {
            use crate::policy::SelectionPolicy;
            self.policy.evaluate(request)
        }

        fn commit(&mut self, request: &SelectionRequest) {
            self.log
                .commits
                .lock()
                .push((request.from_index, request.to_index, request.trigger));
            if let Some(handle) = &self.handle {
                self.log.observed.lock().push(handle.get());
            }
        }

        fn deny(&mut self, request: &SelectionRequest) {
            self.log
                .denies
                .lock()
                .push((request.from_index, request.to_index));
        }
    }

    fn coordinator(initial: usize) -> (SelectionCoordinator<Recorder>, Log, AuthenticationGate) {
        let gate = AuthenticationGate::new(false);
        let log = Log::default();
        let mut coordinator = SelectionCoordinator::new(
            routes(),
            initial,
            Recorder {
                policy: gate.clone(),
                log: log.clone(),
                handle: None,
            },
        );
        let handle = coordinator.handle();
        coordinator.handler_mut().handle = Some(handle);
        (coordinator, log, gate)
    }

    #[test]
    fn test_allow_commits_before_hook() {
        let (mut coordinator, log, _) = coordinator(0);

        assert!(coordinator.request_selection(3, Trigger::User));
        assert_eq!(coordinator.selected_index(), 3);
        assert_eq!(*log.commits.lock(), vec![(0, 3, Trigger::User)]);
        // The commit hook saw the new selection, not the prior one
        assert_eq!(*log.observed.lock(), vec![3]);
        assert!(log.denies.lock().is_empty());
    }

    #[test]
    fn test_deny_leaves_selection_unchanged() {
        let (mut coordinator, log, _) = coordinator(1);

        assert!(!coordinator.request_selection(2, Trigger::User));
        assert_eq!(coordinator.selected_index(), 1);
        assert_eq!(*log.denies.lock(), vec![(1, 2)]);
        assert!(log.commits.lock().is_empty());
    }

    #[test]
    fn test_out_of_range_fires_nothing() {
        let (mut coordinator, log, _) = coordinator(1);

        assert!(!coordinator.request_selection(4, Trigger::Programmatic));
        assert!(!coordinator.request_selection(usize::MAX, Trigger::User));
        assert_eq!(coordinator.selected_index(), 1);
        assert!(log.commits.lock().is_empty());
        assert!(log.denies.lock().is_empty());
    }

    #[test]
    fn test_reselection_still_commits() {
        let (mut coordinator, log, _) = coordinator(1);

        assert!(coordinator.request_selection(1, Trigger::User));
        assert!(coordinator.request_selection(1, Trigger::User));
        assert_eq!(log.commits.lock().len(), 2);
        assert_eq!(coordinator.selected_index(), 1);
    }

    #[test]
    fn test_from_index_tracks_prior_selection() {
        let (mut coordinator, log, gate) = coordinator(0);

        gate.set_authenticated(true);
        coordinator.request_selection(2, Trigger::User);
        coordinator.request_selection(1, Trigger::Programmatic);
        coordinator.request_selection(3, Trigger::Restoration);

        assert_eq!(
            *log.commits.lock(),
            vec![
                (0, 2, Trigger::User),
                (2, 1, Trigger::Programmatic),
                (1, 3, Trigger::Restoration),
            ]
        );
    }

    #[test]
    fn test_invalid_initial_index_falls_back_to_first() {
        let coordinator = SelectionCoordinator::new(routes(), 7, SelectionCallbacks::new(AllowAll));
        assert_eq!(coordinator.selected_index(), 0);
        assert_eq!(coordinator.selected_route().configuration.title, "Home");
    }

    #[test]
    fn test_callbacks_handler() {
        let commits = Arc::new(Mutex::new(Vec::new()));
        let denies = Arc::new(Mutex::new(Vec::new()));
        let commit_log = Arc::clone(&commits);
        let deny_log = Arc::clone(&denies);

        let mut coordinator = SelectionCoordinator::new(
            routes(),
            0,
            SelectionCallbacks::new(AuthenticationGate::new(false))
                .on_commit(move |r| commit_log.lock().push(r.to_index))
                .on_deny(move |r| deny_log.lock().push(r.to_index)),
        );

        assert!(coordinator.request_selection(1, Trigger::User));
        assert!(!coordinator.request_selection(2, Trigger::User));
        assert_eq!(*commits.lock(), vec![1]);
        assert_eq!(*denies.lock(), vec![2]);
        assert_eq!(coordinator.route(2).unwrap().configuration.title, "Inbox");
        assert!(coordinator.route(9).is_none());
    }
}
