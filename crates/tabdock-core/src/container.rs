//! Tab container
//!
//! Owns the selection coordinator and translates raw UI events (taps,
//! swipes, layout, navigation pushes) into selection requests. Selection
//! truth lives in the coordinator; the container keeps the visible page,
//! the bar highlight and bottom-bar coverage in line with it.

use tabdock_routes::{PageHandle, Route, RouteTable, SelectionRequest, Trigger};
use tabdock_selection::{SelectionCoordinator, SelectionHandle, SelectionPolicy};
use tabdock_storage::SelectionStore;

use crate::config::Config;
use crate::coverage::Coverage;
use crate::page::{NavigationDirection, NavigationStackState, PageRegion};
use crate::presenter::{Listeners, PresentationState, Presenter, Restoration};
use crate::view::{BarPresentation, TabBarView};
use crate::Result;

pub struct TabContainer {
    coordinator: SelectionCoordinator<Presenter>,
    restoration_key: Option<String>,
    /// Explicit selection requested before the first non-zero layout
    pending_initial_selection: Option<(usize, Trigger)>,
    has_applied_initial_selection: bool,
}

impl TabContainer {
    pub fn new<P, B, R>(
        config: &Config,
        routes: RouteTable,
        policy: P,
        tab_bar: B,
        pages: R,
    ) -> Result<Self>
    where
        P: SelectionPolicy + 'static,
        B: TabBarView + 'static,
        R: PageRegion + 'static,
    {
        config.validate()?;
        let initial_index = routes.check_index(config.initial_index)?;

        let mut tab_bar: Box<dyn TabBarView> = Box::new(tab_bar);
        tab_bar.configure(&routes, initial_index);

        let presenter = Presenter {
            policy: Box::new(policy),
            tab_bar,
            pages: Box::new(pages),
            restoration: None,
            listeners: Listeners::default(),
            state: PresentationState::default(),
            animate_transitions: config.animate_transitions,
            bar_height: config.bar_height,
        };

        tracing::debug!(
            routes = routes.len(),
            initial_index,
            restoration = config.restoration_enabled(),
            "Created tab container"
        );

        Ok(Self {
            coordinator: SelectionCoordinator::new(routes, initial_index, presenter),
            restoration_key: config.restoration_key.clone(),
            pending_initial_selection: None,
            has_applied_initial_selection: false,
        })
    }

    /// Persist committed selections to `store`. Ignored when the config
    /// carries no restoration key.
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: SelectionStore + 'static,
    {
        match self.restoration_key.clone() {
            Some(key) => {
                self.presenter_mut().restoration = Some(Restoration {
                    store: Box::new(store),
                    key,
                });
            }
            None => tracing::debug!("Restoration disabled, selection store ignored"),
        }
        self
    }

    pub fn on_selection_changed<F>(&mut self, listener: F)
    where
        F: FnMut(&SelectionRequest) + Send + 'static,
    {
        self.presenter_mut().listeners.on_changed(Box::new(listener));
    }

    pub fn on_selection_denied<F>(&mut self, listener: F)
    where
        F: FnMut(&SelectionRequest) + Send + 'static,
    {
        self.presenter_mut().listeners.on_denied(Box::new(listener));
    }

    fn presenter(&self) -> &Presenter {
        self.coordinator.handler()
    }

    fn presenter_mut(&mut self) -> &mut Presenter {
        self.coordinator.handler_mut()
    }

    // === Selection triggers ===

    /// A tap on the bar item at `index`.
    pub fn handle_tap(&mut self, index: usize) -> bool {
        self.coordinator.request_selection(index, Trigger::User)
    }

    /// Programmatic selection. Returns whether the selection was committed.
    ///
    /// Before the first layout nothing can be committed: the request is held,
    /// `false` is returned, and it is applied at first layout unless a valid
    /// persisted index takes precedence.
    pub fn select_tab(&mut self, index: usize, animated: bool) -> bool {
        if !self.routes().contains_index(index) {
            return false;
        }

        if !self.has_applied_initial_selection {
            tracing::debug!(index, "Deferring selection until first layout");
            self.pending_initial_selection = Some((index, Trigger::Programmatic));
            return false;
        }

        self.presenter_mut().state.animation_suppressed = !animated;
        let accepted = self
            .coordinator
            .request_selection(index, Trigger::Programmatic);
        self.presenter_mut().state.animation_suppressed = false;

        if accepted {
            // Re-assert immediately in case an in-flight highlight animation lands late.
            self.presenter_mut().tab_bar.set_selected_index(index, false);
        }
        accepted
    }

    /// Layout pass. The first one with a non-zero size applies the initial
    /// selection, restoring a persisted index when one is valid.
    pub fn layout_did_change(&mut self, width: f64, height: f64) {
        if self.has_applied_initial_selection || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.has_applied_initial_selection = true;
        let pending = self.pending_initial_selection.take();

        if let Some(index) = self.restored_index() {
            tracing::info!(index, "Restoring persisted selection");
            if self.coordinator.request_selection(index, Trigger::Restoration) {
                return;
            }
        }

        if let Some((index, trigger)) = pending {
            if self.coordinator.request_selection(index, trigger) {
                return;
            }
        }

        let current = self.coordinator.selected_index();
        if !self
            .coordinator
            .request_selection(current, Trigger::Programmatic)
        {
            // Even a denied initial selection must leave a page on screen.
            tracing::warn!(index = current, "Initial selection denied, presenting it anyway");
            self.reconcile_presentation();
        }
    }

    fn restored_index(&self) -> Option<usize> {
        let restoration = self.presenter().restoration.as_ref()?;

        match restoration.store.load_index(&restoration.key) {
            Ok(Some(index)) if self.routes().contains_index(index) => Some(index),
            Ok(Some(index)) => {
                tracing::warn!(
                    index,
                    routes = self.routes().len(),
                    "Persisted selection out of range"
                );
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %restoration.key, "Failed to read persisted selection: {}", e);
                None
            }
        }
    }

    /// The page region finished a transition to `page`.
    ///
    /// Gesture-driven transitions are turned into selection requests, also
    /// while a container-driven transition animates; only a completion at
    /// that transition's own target is ignored. A denied swipe animates the
    /// region back to the selected page.
    pub fn page_region_did_finish_transition(
        &mut self,
        page: PageHandle,
        previous: &[PageHandle],
        completed: bool,
    ) {
        if !completed {
            return;
        }
        if self.presenter().state.transition_target == Some(page) {
            tracing::debug!(page = %page, "Ignoring completion of container-driven transition");
            return;
        }
        let Some(index) = self.routes().index_of(&page) else {
            tracing::warn!(page = %page, "Page region reported an unknown page");
            return;
        };

        // The gesture landed elsewhere, superseding any running transition.
        self.presenter_mut().state.transition_target = None;

        let previous_index = self.coordinator.selected_index();
        tracing::debug!(
            index,
            previous_index,
            previous_pages = previous.len(),
            "Swipe finished"
        );

        if self.coordinator.request_selection(index, Trigger::User) {
            return;
        }

        let back_to = self.coordinator.selected_route().page;
        let direction = NavigationDirection::snap_back(index, previous_index);
        let presenter = self.presenter_mut();
        let animated = presenter.can_animate_pages();
        presenter.show_page(back_to, direction, animated);
    }

    /// Completion of a transition to `page` started through
    /// `PageRegion::set_page` that returned `TransitionStatus::Pending`.
    ///
    /// Completions of superseded transitions are ignored. Once the current
    /// one settles, a cancelled transition or a front page that differs from
    /// the selection is reconciled; the selection itself never reverts.
    pub fn finish_page_transition(&mut self, page: PageHandle, completed: bool) {
        let state = &mut self.presenter_mut().state;
        if state.transition_target != Some(page) {
            tracing::debug!(page = %page, "Ignoring completion of superseded transition");
            return;
        }
        state.transition_target = None;

        let selected_page = self.coordinator.selected_route().page;
        let front = self.presenter().pages.current_page();
        if !completed || front != Some(selected_page) {
            tracing::debug!(completed, "Page transition settled off selection, reconciling");
            self.reconcile_presentation();
        }
    }

    fn reconcile_presentation(&mut self) {
        let selected_index = self.coordinator.selected_index();
        let selected_page = self.coordinator.selected_route().page;
        let front_index = self
            .presenter()
            .pages
            .current_page()
            .map(|page| self.routes().index_of(&page));

        let presenter = self.presenter_mut();
        match front_index {
            Some(Some(index)) if index == selected_index => {}
            Some(Some(index)) => {
                let direction = NavigationDirection::between(index, selected_index);
                presenter.show_page(selected_page, direction, false);
            }
            _ => presenter.show_page(selected_page, NavigationDirection::Forward, false),
        }
        presenter.tab_bar.set_selected_index(selected_index, false);
        presenter.refresh_coverage(&selected_page, false);
    }

    // === Page adjacency (swipe data source) ===

    /// Page preceding `page`, or `None` at the first page or while locked.
    pub fn page_before(&self, page: &PageHandle) -> Option<PageHandle> {
        if self.is_layout_locked() {
            return None;
        }
        let index = self.routes().index_of(page)?.checked_sub(1)?;
        self.routes().route(index).map(|route| route.page)
    }

    /// Page following `page`, or `None` at the last page or while locked.
    pub fn page_after(&self, page: &PageHandle) -> Option<PageHandle> {
        if self.is_layout_locked() {
            return None;
        }
        let index = self.routes().index_of(page)? + 1;
        self.routes().route(index).map(|route| route.page)
    }

    // === Layout lock, coverage and bar state ===

    pub fn set_layout_locked(&mut self, locked: bool) {
        self.presenter_mut().state.lock.set(locked);
    }

    pub fn is_layout_locked(&self) -> bool {
        self.presenter().state.lock.is_locked()
    }

    /// A page's child navigation stack was pushed or popped.
    ///
    /// Stacks of pages other than the selected one are ignored. Covering is
    /// immediate; uncovering during an interactive gesture waits for
    /// `interactive_transition_did_end`.
    pub fn navigation_stack_did_change(&mut self, stack: &NavigationStackState, interactive: bool) {
        if stack.owner != self.coordinator.selected_route().page {
            tracing::debug!(page = %stack.owner, "Ignoring navigation change of background page");
            return;
        }

        let presenter = self.presenter_mut();
        let before = presenter.state.coverage;
        let after = if stack.covers_bottom_bar() {
            Coverage::Covered
        } else {
            before.request_uncover(interactive)
        };

        if before != after {
            tracing::debug!(?before, ?after, depth = stack.depth, "Coverage transition");
            presenter.state.coverage = after;
            let animated = presenter.can_animate_pages();
            presenter.apply_presentation(animated);
        }
    }

    /// The interactive gesture (e.g. a back swipe) settled.
    pub fn interactive_transition_did_end(&mut self, cancelled: bool) {
        let presenter = self.presenter_mut();
        let before = presenter.state.coverage;
        let after = before.finish_interactive(cancelled);

        if before != after {
            tracing::debug!(?before, ?after, cancelled, "Interactive transition settled");
            presenter.state.coverage = after;
            presenter.apply_presentation(false);
        }
    }

    pub fn set_bar_hidden(&mut self, hidden: bool, animated: bool) {
        let presenter = self.presenter_mut();
        presenter.state.bar_hidden = hidden;
        let animated = animated && presenter.animate_transitions;
        presenter.apply_presentation(animated);
    }

    pub fn set_window_attached(&mut self, attached: bool) {
        self.presenter_mut().state.attached_to_window = attached;
    }

    // === Tab item pass-through ===

    pub fn set_badge(&mut self, value: Option<&str>, index: usize) {
        if !self.routes().contains_index(index) {
            tracing::debug!(index, "Ignoring badge for unknown tab");
            return;
        }
        self.presenter_mut().tab_bar.update_badge(value, index);
    }

    pub fn update_images(&mut self, normal: Option<&str>, selected: Option<&str>, index: usize) {
        if !self.routes().contains_index(index) {
            tracing::debug!(index, "Ignoring images for unknown tab");
            return;
        }
        self.presenter_mut()
            .tab_bar
            .update_images(normal, selected, index);
    }

    pub fn set_image_tint_enabled(&mut self, enabled: bool) {
        self.presenter_mut().tab_bar.set_image_tint_enabled(enabled);
    }

    // === Queries ===

    pub fn selected_index(&self) -> usize {
        self.coordinator.selected_index()
    }

    pub fn selection_handle(&self) -> SelectionHandle {
        self.coordinator.handle()
    }

    pub fn route(&self, index: usize) -> Option<&Route> {
        self.coordinator.route(index)
    }

    pub fn routes(&self) -> &RouteTable {
        self.coordinator.routes()
    }

    pub fn presentation(&self) -> BarPresentation {
        self.presenter().presentation()
    }

    pub fn is_bottom_bar_covered(&self) -> bool {
        self.presenter().state.coverage.is_covered()
    }

    pub fn is_page_transition_in_flight(&self) -> bool {
        self.presenter().state.is_page_transition_in_flight()
    }

    pub fn has_applied_initial_selection(&self) -> bool {
        self.has_applied_initial_selection
    }

    pub fn pending_initial_selection(&self) -> Option<(usize, Trigger)> {
        self.pending_initial_selection
    }
}
