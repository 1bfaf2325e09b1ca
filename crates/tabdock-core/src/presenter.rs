//! Presentation state driven by committed selections
//!
//! The presenter is the coordinator's handler. On commit it updates, in order:
//! feedback listeners, persistence, the bar highlight, the visible page and
//! bottom-bar coverage. It never writes the selected index itself.

use tabdock_routes::{PageHandle, SelectionDecision, SelectionRequest};
use tabdock_selection::{SelectionHandler, SelectionPolicy};
use tabdock_storage::SelectionStore;

use crate::coverage::Coverage;
use crate::lock::LayoutLock;
use crate::page::{NavigationDirection, PageRegion, PageTransition, TransitionStatus};
use crate::view::{BarPresentation, TabBarView};

type Listener = Box<dyn FnMut(&SelectionRequest) + Send>;

#[derive(Default)]
pub(crate) struct Listeners {
    changed: Vec<Listener>,
    denied: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn on_changed(&mut self, listener: Listener) {
        self.changed.push(listener);
    }

    pub(crate) fn on_denied(&mut self, listener: Listener) {
        self.denied.push(listener);
    }
}

/// Persistence target for committed selections.
pub(crate) struct Restoration {
    pub(crate) store: Box<dyn SelectionStore>,
    pub(crate) key: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PresentationState {
    pub(crate) lock: LayoutLock,
    pub(crate) coverage: Coverage,
    pub(crate) bar_hidden: bool,
    pub(crate) attached_to_window: bool,
    /// Target of the container-driven page transition still animating
    pub(crate) transition_target: Option<PageHandle>,
    /// Set for the duration of a `select_tab(_, false)` request
    pub(crate) animation_suppressed: bool,
}

impl PresentationState {
    pub(crate) fn is_page_transition_in_flight(&self) -> bool {
        self.transition_target.is_some()
    }
}

pub(crate) struct Presenter {
    pub(crate) policy: Box<dyn SelectionPolicy>,
    pub(crate) tab_bar: Box<dyn TabBarView>,
    pub(crate) pages: Box<dyn PageRegion>,
    pub(crate) restoration: Option<Restoration>,
    pub(crate) listeners: Listeners,
    pub(crate) state: PresentationState,
    pub(crate) animate_transitions: bool,
    pub(crate) bar_height: f64,
}

impl Presenter {
    fn animations_enabled(&self) -> bool {
        self.animate_transitions && !self.state.animation_suppressed
    }

    /// Animate page changes only when they can be seen.
    pub(crate) fn can_animate_pages(&self) -> bool {
        self.animations_enabled() && self.state.attached_to_window
    }

    /// Page the region is showing or animating towards.
    pub(crate) fn presented_page(&self) -> Option<PageHandle> {
        self.state
            .transition_target
            .or_else(|| self.pages.current_page())
    }

    /// Command the page region, remembering the target while it animates.
    /// A newer transition supersedes the one in flight.
    pub(crate) fn show_page(&mut self, page: PageHandle, direction: NavigationDirection, animated: bool) {
        let status = self.pages.set_page(PageTransition {
            page,
            direction,
            animated,
        });

        tracing::debug!(page = %page, ?direction, animated, ?status, "Page transition started");

        self.state.transition_target = match status {
            TransitionStatus::Pending => Some(page),
            TransitionStatus::Completed => None,
        };
    }

    /// Coverage follows the selected page's navigation stack.
    pub(crate) fn refresh_coverage(&mut self, selected_page: &PageHandle, animated: bool) {
        let covered = self
            .pages
            .navigation_stack(selected_page)
            .map(|stack| stack.covers_bottom_bar())
            .unwrap_or(false);

        if covered != self.state.coverage.is_covered() {
            tracing::debug!(covered, "Bottom bar coverage changed");
        }
        self.state.coverage = Coverage::reset(covered);
        self.apply_presentation(animated);
    }

    pub(crate) fn presentation(&self) -> BarPresentation {
        BarPresentation::new(
            self.state.bar_hidden,
            self.state.coverage.is_covered(),
            self.bar_height,
        )
    }

    pub(crate) fn apply_presentation(&mut self, animated: bool) {
        let presentation = self.presentation();
        self.tab_bar.apply_presentation(presentation, animated);
    }

    fn persist(&mut self, index: usize) {
        let Some(restoration) = &self.restoration else {
            return;
        };

        // A failed write never blocks the selection itself.
        if let Err(e) = restoration.store.save_index(&restoration.key, index) {
            tracing::warn!(key = %restoration.key, index, "Failed to persist selection: {}", e);
        }
    }
}

impl SelectionHandler for Presenter {
    fn decide(&mut self, request: &SelectionRequest) -> SelectionDecision {
        self.policy.evaluate(request)
    }

    fn commit(&mut self, request: &SelectionRequest) {
        let animated = request.trigger.allows_animation() && self.animations_enabled();

        for listener in &mut self.listeners.changed {
            listener(request);
        }

        self.persist(request.to_index);

        self.tab_bar.set_selected_index(request.to_index, animated);

        let target = request.route.page;
        let previous = self.presented_page();

        if previous == Some(target) {
            tracing::debug!(index = request.to_index, "Target page already visible");
        } else {
            // First placement is never animated.
            let animate_page = animated && self.state.attached_to_window && previous.is_some();
            let direction = NavigationDirection::between(request.from_index, request.to_index);
            self.show_page(target, direction, animate_page);
        }

        self.refresh_coverage(&target, animated);

        tracing::info!(
            from = request.from_index,
            to = request.to_index,
            trigger = %request.trigger,
            "Selected tab"
        );
    }

    fn deny(&mut self, request: &SelectionRequest) {
        for listener in &mut self.listeners.denied {
            listener(request);
        }

        tracing::info!(
            from = request.from_index,
            to = request.to_index,
            trigger = %request.trigger,
            "Tab selection denied by policy"
        );
    }
}
