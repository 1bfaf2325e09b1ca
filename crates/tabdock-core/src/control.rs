//! Upward control surface
//!
//! Nested page content drives the container through this surface. Content
//! receives a `ContainerHandle` at construction instead of discovering the
//! container at runtime.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::container::TabContainer;
use crate::page::NavigationStackState;

pub trait TabControl {
    fn select_tab(&self, index: usize, animated: bool) -> bool;

    fn set_badge(&self, value: Option<&str>, index: usize);

    fn update_images(&self, normal: Option<&str>, selected: Option<&str>, index: usize);

    fn set_image_tint_enabled(&self, enabled: bool);

    fn set_layout_locked(&self, locked: bool);

    fn set_bar_hidden(&self, hidden: bool, animated: bool);

    fn navigation_stack_did_change(&self, stack: &NavigationStackState, interactive: bool);
}

/// Shared handle to a container.
///
/// Collaborators must not call back through the handle from inside a
/// container callback; the container is locked for the duration.
pub struct ContainerHandle {
    inner: Arc<Mutex<TabContainer>>,
}

impl ContainerHandle {
    pub fn new(container: TabContainer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(container)),
        }
    }

    pub fn with_container<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut TabContainer) -> T,
    {
        let mut container = self.inner.lock();
        f(&mut container)
    }

    pub fn selected_index(&self) -> usize {
        self.inner.lock().selected_index()
    }
}

impl Clone for ContainerHandle {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl TabControl for ContainerHandle {
    fn select_tab(&self, index: usize, animated: bool) -> bool {
        self.inner.lock().select_tab(index, animated)
    }

    fn set_badge(&self, value: Option<&str>, index: usize) {
        self.inner.lock().set_badge(value, index)
    }

    fn update_images(&self, normal: Option<&str>, selected: Option<&str>, index: usize) {
        self.inner.lock().update_images(normal, selected, index)
    }

    fn set_image_tint_enabled(&self, enabled: bool) {
        self.inner.lock().set_image_tint_enabled(enabled)
    }

    fn set_layout_locked(&self, locked: bool) {
        self.inner.lock().set_layout_locked(locked)
    }

    fn set_bar_hidden(&self, hidden: bool, animated: bool) {
        self.inner.lock().set_bar_hidden(hidden, animated)
    }

    fn navigation_stack_did_change(&self, stack: &NavigationStackState, interactive: bool) {
        self.inner
            .lock()
            .navigation_stack_did_change(stack, interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::page::HeadlessPageRegion;
    use crate::view::HeadlessTabBar;
    use std::path::PathBuf;
    use tabdock_routes::{RouteTable, TabItemConfiguration};
    use tabdock_selection::AllowAll;

    /// Child content that only knows the control surface.
    struct DetailScreen<C: TabControl> {
        control: C,
    }

    impl<C: TabControl> DetailScreen<C> {
        fn show_inbox(&self) -> bool {
            self.control.set_badge(None, 1);
            self.control.select_tab(1, false)
        }
    }

    #[test]
    fn test_nested_content_drives_container() {
        let routes = RouteTable::from_configurations([
            TabItemConfiguration::new("Home"),
            TabItemConfiguration::new("Inbox").with_badge("4"),
        ])
        .unwrap();
        let bar = HeadlessTabBar::new();
        let mut container = TabContainer::new(
            &Config::new(PathBuf::from(".")),
            routes,
            AllowAll,
            bar.clone(),
            HeadlessPageRegion::new(),
        )
        .unwrap();
        container.layout_did_change(320.0, 480.0);

        let handle = ContainerHandle::new(container);
        let screen = DetailScreen {
            control: handle.clone(),
        };

        assert!(screen.show_inbox());
        assert_eq!(handle.selected_index(), 1);
        assert!(bar.item(1).unwrap().badge_value.is_none());

        handle.set_layout_locked(true);
        let locked = handle.with_container(|c| {
            let home = c.route(0).map(|r| r.page);
            home.and_then(|page| c.page_after(&page))
        });
        assert!(locked.is_none());
    }
}
