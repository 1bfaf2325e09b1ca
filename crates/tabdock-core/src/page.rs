//! Page region collaborator
//!
//! The page region shows one content page at a time. It accepts "set current
//! page with direction and animation" and reports gesture-driven transitions
//! back to the container.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use tabdock_routes::PageHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDirection {
    Forward,
    Reverse,
}

impl NavigationDirection {
    /// Direction for moving from `from_index` to `to_index`.
    pub fn between(from_index: usize, to_index: usize) -> Self {
        if to_index >= from_index {
            NavigationDirection::Forward
        } else {
            NavigationDirection::Reverse
        }
    }

    /// Direction for returning from a rejected target to `previous_index`.
    pub fn snap_back(target_index: usize, previous_index: usize) -> Self {
        if target_index >= previous_index {
            NavigationDirection::Reverse
        } else {
            NavigationDirection::Forward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTransition {
    pub page: PageHandle,
    pub direction: NavigationDirection,
    pub animated: bool,
}

/// Whether `set_page` finished synchronously or completes later through
/// `TabContainer::finish_page_transition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    Completed,
    Pending,
}

/// Shape of a page's child navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStackState {
    /// Page whose stack this is
    pub owner: PageHandle,
    pub depth: usize,
    /// The top-most entry asks for the bottom bar to be hidden
    pub top_hides_bottom_bar: bool,
}

impl NavigationStackState {
    pub fn root(owner: PageHandle) -> Self {
        Self {
            owner,
            depth: 1,
            top_hides_bottom_bar: false,
        }
    }

    pub fn covers_bottom_bar(&self) -> bool {
        self.depth > 1 && self.top_hides_bottom_bar
    }
}

pub trait PageRegion: Send {
    /// Page currently in front, if any has been placed.
    fn current_page(&self) -> Option<PageHandle>;

    fn set_page(&mut self, transition: PageTransition) -> TransitionStatus;

    fn navigation_stack(&self, _page: &PageHandle) -> Option<NavigationStackState> {
        None
    }
}

#[derive(Debug, Default)]
struct RegionState {
    front: Option<PageHandle>,
    pending: Option<PageTransition>,
    transitions: Vec<PageTransition>,
    /// Per page, whether each pushed entry hides the bottom bar
    stacks: HashMap<PageHandle, Vec<bool>>,
}

/// In-memory page region. Animated transitions stay pending until
/// `complete_pending` is called, mimicking an animation completion.
#[derive(Debug, Default)]
pub struct HeadlessPageRegion {
    state: Arc<RwLock<RegionState>>,
}

impl HeadlessPageRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every transition the container commanded, in order.
    pub fn transitions(&self) -> Vec<PageTransition> {
        self.state.read().transitions.clone()
    }

    pub fn pending(&self) -> Option<PageTransition> {
        self.state.read().pending
    }

    /// Finish the pending animation; returns the page that is now in front.
    pub fn complete_pending(&self) -> Option<PageHandle> {
        let mut state = self.state.write();
        if let Some(transition) = state.pending.take() {
            state.front = Some(transition.page);
        }
        state.front
    }

    /// Drop the pending animation, leaving the previous page in front.
    pub fn cancel_pending(&self) -> Option<PageTransition> {
        self.state.write().pending.take()
    }

    /// Simulate a completed swipe, which also interrupts any pending
    /// animation. Returns the pages that were in front before.
    pub fn swipe_to(&self, page: PageHandle) -> Vec<PageHandle> {
        let mut state = self.state.write();
        state.pending = None;
        let previous = state.front.replace(page);
        previous.into_iter().collect()
    }

    pub fn push(&self, page: PageHandle, hides_bottom_bar: bool) -> NavigationStackState {
        let mut state = self.state.write();
        state.stacks.entry(page).or_default().push(hides_bottom_bar);
        stack_state(&state, page)
    }

    pub fn pop(&self, page: PageHandle) -> NavigationStackState {
        let mut state = self.state.write();
        if let Some(stack) = state.stacks.get_mut(&page) {
            stack.pop();
        }
        stack_state(&state, page)
    }
}

fn stack_state(state: &RegionState, page: PageHandle) -> NavigationStackState {
    let pushed = state.stacks.get(&page).map(Vec::as_slice).unwrap_or_default();
    NavigationStackState {
        owner: page,
        depth: pushed.len() + 1,
        top_hides_bottom_bar: pushed.last().copied().unwrap_or(false),
    }
}

impl Clone for HeadlessPageRegion {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl PageRegion for HeadlessPageRegion {
    fn current_page(&self) -> Option<PageHandle> {
        self.state.read().front
    }

    fn set_page(&mut self, transition: PageTransition) -> TransitionStatus {
        let mut state = self.state.write();
        state.transitions.push(transition);

        if transition.animated {
            state.pending = Some(transition);
            TransitionStatus::Pending
        } else {
            state.pending = None;
            state.front = Some(transition.page);
            TransitionStatus::Completed
        }
    }

    fn navigation_stack(&self, page: &PageHandle) -> Option<NavigationStackState> {
        Some(stack_state(&self.state.read(), *page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions() {
        assert_eq!(NavigationDirection::between(1, 2), NavigationDirection::Forward);
        assert_eq!(NavigationDirection::between(2, 2), NavigationDirection::Forward);
        assert_eq!(NavigationDirection::between(3, 0), NavigationDirection::Reverse);

        assert_eq!(NavigationDirection::snap_back(2, 1), NavigationDirection::Reverse);
        assert_eq!(NavigationDirection::snap_back(0, 1), NavigationDirection::Forward);
    }

    #[test]
    fn test_animated_transition_waits_for_completion() {
        let mut region = HeadlessPageRegion::new();
        let first = PageHandle::new();
        let second = PageHandle::new();

        let status = region.set_page(PageTransition {
            page: first,
            direction: NavigationDirection::Forward,
            animated: false,
        });
        assert_eq!(status, TransitionStatus::Completed);
        assert_eq!(region.current_page(), Some(first));

        let status = region.set_page(PageTransition {
            page: second,
            direction: NavigationDirection::Forward,
            animated: true,
        });
        assert_eq!(status, TransitionStatus::Pending);
        assert_eq!(region.current_page(), Some(first));
        assert_eq!(region.complete_pending(), Some(second));
    }

    #[test]
    fn test_navigation_stack_coverage() {
        let region = HeadlessPageRegion::new();
        let page = PageHandle::new();

        assert!(!region.navigation_stack(&page).unwrap().covers_bottom_bar());

        let pushed = region.push(page, true);
        assert_eq!(pushed.depth, 2);
        assert!(pushed.covers_bottom_bar());

        let popped = region.pop(page);
        assert_eq!(popped, NavigationStackState::root(page));
    }
}
