//! Tab bar rendering collaborator
//!
//! The tab bar renders the route list and the current highlight. It reports
//! raw tap indices upward and owns no selection truth.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tabdock_routes::{RouteTable, TabItemConfiguration};

/// Z-ordering of the bottom bar relative to page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarLayer {
    Front,
    /// Pushed child content draws over the bar
    Behind,
}

/// Final bottom-bar state handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPresentation {
    pub hidden: bool,
    pub covered: bool,
    pub layer: BarLayer,
    /// Bottom inset applied to page content
    pub content_inset: f64,
}

impl BarPresentation {
    pub fn new(hidden: bool, covered: bool, bar_height: f64) -> Self {
        let layer = if covered {
            BarLayer::Behind
        } else {
            BarLayer::Front
        };
        let content_inset = if hidden || covered { 0.0 } else { bar_height };

        Self {
            hidden,
            covered,
            layer,
            content_inset,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.covered
    }
}

/// Implementations must treat `set_selected_index` as idempotent and ignore
/// out-of-range indices.
pub trait TabBarView: Send {
    fn configure(&mut self, routes: &RouteTable, selected_index: usize);

    fn set_selected_index(&mut self, index: usize, animated: bool);

    fn update_badge(&mut self, value: Option<&str>, index: usize);

    fn update_images(&mut self, normal: Option<&str>, selected: Option<&str>, index: usize);

    fn set_image_tint_enabled(&mut self, enabled: bool);

    fn apply_presentation(&mut self, presentation: BarPresentation, animated: bool);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabBarSnapshot {
    pub items: Vec<TabItemConfiguration>,
    pub selected_index: Option<usize>,
    pub image_tint_enabled: bool,
    pub presentation: Option<BarPresentation>,
    /// Highlight updates that changed the selection, with their animation flag
    pub highlight_changes: Vec<(usize, bool)>,
    /// Every call to `set_selected_index`, including repeats
    pub highlight_calls: usize,
}

/// In-memory tab bar. Clones share state so a host can keep a handle for
/// inspection after moving one into the container.
#[derive(Debug, Default)]
pub struct HeadlessTabBar {
    state: Arc<RwLock<TabBarSnapshot>>,
}

impl HeadlessTabBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TabBarSnapshot {
        self.state.read().clone()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.read().selected_index
    }

    pub fn presentation(&self) -> Option<BarPresentation> {
        self.state.read().presentation
    }

    pub fn item(&self, index: usize) -> Option<TabItemConfiguration> {
        self.state.read().items.get(index).cloned()
    }
}

impl Clone for HeadlessTabBar {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl TabBarView for HeadlessTabBar {
    fn configure(&mut self, routes: &RouteTable, selected_index: usize) {
        let mut state = self.state.write();
        state.items = routes
            .iter()
            .map(|route| route.configuration.clone())
            .collect();
        state.selected_index = routes.contains_index(selected_index).then_some(selected_index);
        state.image_tint_enabled = true;
    }

    fn set_selected_index(&mut self, index: usize, animated: bool) {
        let mut state = self.state.write();
        state.highlight_calls += 1;

        if index >= state.items.len() || state.selected_index == Some(index) {
            return;
        }

        state.selected_index = Some(index);
        state.highlight_changes.push((index, animated));
    }

    fn update_badge(&mut self, value: Option<&str>, index: usize) {
        if let Some(item) = self.state.write().items.get_mut(index) {
            item.badge_value = value.map(str::to_string);
        }
    }

    fn update_images(&mut self, normal: Option<&str>, selected: Option<&str>, index: usize) {
        if let Some(item) = self.state.write().items.get_mut(index) {
            item.image = normal.map(str::to_string);
            item.selected_image = selected.map(str::to_string);
        }
    }

    fn set_image_tint_enabled(&mut self, enabled: bool) {
        self.state.write().image_tint_enabled = enabled;
    }

    fn apply_presentation(&mut self, presentation: BarPresentation, _animated: bool) {
        self.state.write().presentation = Some(presentation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> HeadlessTabBar {
        let routes = RouteTable::from_configurations([
            TabItemConfiguration::new("Home"),
            TabItemConfiguration::new("Search"),
        ])
        .unwrap();
        let mut bar = HeadlessTabBar::new();
        bar.configure(&routes, 0);
        bar
    }

    #[test]
    fn test_set_selected_index_is_idempotent() {
        let mut bar = configured();

        bar.set_selected_index(1, true);
        bar.set_selected_index(1, true);

        let snapshot = bar.snapshot();
        assert_eq!(snapshot.selected_index, Some(1));
        assert_eq!(snapshot.highlight_changes, vec![(1, true)]);
        assert_eq!(snapshot.highlight_calls, 2);
    }

    #[test]
    fn test_out_of_range_highlight_is_ignored() {
        let mut bar = configured();
        bar.set_selected_index(5, false);
        assert_eq!(bar.selected_index(), Some(0));
        assert!(bar.snapshot().highlight_changes.is_empty());
    }

    #[test]
    fn test_badge_and_images() {
        let mut bar = configured();
        let observer = bar.clone();

        bar.update_badge(Some("3"), 1);
        bar.update_images(Some("mag"), Some("mag.fill"), 1);
        bar.update_badge(Some("x"), 7);

        let item = observer.item(1).unwrap();
        assert_eq!(item.badge_value.as_deref(), Some("3"));
        assert_eq!(item.selected_image.as_deref(), Some("mag.fill"));

        bar.update_badge(None, 1);
        assert!(observer.item(1).unwrap().badge_value.is_none());
    }

    #[test]
    fn test_presentation_layers() {
        let visible = BarPresentation::new(false, false, 49.0);
        assert!(visible.is_visible());
        assert_eq!(visible.layer, BarLayer::Front);
        assert_eq!(visible.content_inset, 49.0);

        let covered = BarPresentation::new(false, true, 49.0);
        assert!(!covered.is_visible());
        assert_eq!(covered.layer, BarLayer::Behind);
        assert_eq!(covered.content_inset, 0.0);

        let hidden = BarPresentation::new(true, false, 49.0);
        assert_eq!(hidden.layer, BarLayer::Front);
        assert_eq!(hidden.content_inset, 0.0);
    }
}
