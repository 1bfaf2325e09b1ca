//! TabDock demo host
//!
//! Wires a container to headless collaborators and plays a short session:
//! restoration, taps, a gated swipe, a child push and a back gesture.
//! Pass a JSON config path as the first argument to override defaults.

use anyhow::Context;
use tabdock_core::{
    AuthenticationGate, Config, ContainerHandle, HeadlessPageRegion, HeadlessTabBar, MemoryStore,
    PageRegion, RouteTable, TabContainer, TabControl,
};

const ROUTES: &str = r#"[
    {"title": "Home", "image": "house", "selected_image": "house.fill"},
    {"title": "Search", "image": "magnifyingglass"},
    {"title": "Compose", "image": "plus", "is_prominent": true},
    {"title": "Inbox", "image": "tray", "badge_value": "3", "requires_authentication": true},
    {"title": "Profile", "image": "person"}
]"#;

fn load_config() -> anyhow::Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            Config::load(&path).with_context(|| format!("failed to load config from {path}"))
        }
        None => Ok(Config::default()),
    }
}

fn build_container(
    config: &Config,
    gate: AuthenticationGate,
    bar: HeadlessTabBar,
    pages: HeadlessPageRegion,
) -> anyhow::Result<TabContainer> {
    let routes = RouteTable::from_json(ROUTES).context("invalid route definition")?;
    let container = TabContainer::new(config, routes, gate, bar, pages)?;

    let container = match tabdock_core::open_database(config) {
        Ok(db) => container.with_store(db),
        Err(e) => {
            tracing::warn!("Falling back to in-memory selection store: {}", e);
            container.with_store(MemoryStore::new())
        }
    };

    Ok(container)
}

/// Let a pending page animation land and report it to the container.
fn settle(pages: &HeadlessPageRegion, handle: &ContainerHandle) {
    if let Some(transition) = pages.pending() {
        pages.complete_pending();
        handle.with_container(|c| c.finish_page_transition(transition.page, true));
    }
}

fn main() -> anyhow::Result<()> {
    tabdock_core::init_logging();

    let config = load_config()?;
    let gate = AuthenticationGate::new(false);
    let bar = HeadlessTabBar::new();
    let pages = HeadlessPageRegion::new();

    let mut container = build_container(&config, gate.clone(), bar.clone(), pages.clone())?;
    container.on_selection_changed(|request| {
        tracing::info!(index = request.to_index, title = %request.route.configuration.title, "Feedback");
    });
    container.set_window_attached(true);
    container.layout_did_change(390.0, 844.0);

    let handle = ContainerHandle::new(container);

    // Tap Search, then let the animation land
    handle.with_container(|c| c.handle_tap(1));
    settle(&pages, &handle);

    // Swipe towards the gated Inbox while signed out: snaps back
    let inbox = handle.with_container(|c| c.route(3).map(|route| route.page));
    if let Some(inbox) = inbox {
        let previous = pages.swipe_to(inbox);
        handle.with_container(|c| c.page_region_did_finish_transition(inbox, &previous, true));
        settle(&pages, &handle);
    }

    // Sign in and open Inbox from nested content
    gate.set_authenticated(true);
    handle.set_badge(None, 3);
    handle.select_tab(3, true);
    settle(&pages, &handle);

    // Push a detail screen that hides the bar, then back-swipe out of it
    if let Some(page) = pages.current_page() {
        let pushed = pages.push(page, true);
        handle.navigation_stack_did_change(&pushed, false);

        let popped = pages.pop(page);
        handle.navigation_stack_did_change(&popped, true);
        handle.with_container(|c| c.interactive_transition_did_end(false));
    }

    let snapshot = bar.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    tracing::info!(selected = handle.selected_index(), "Demo session finished");

    Ok(())
}
