//! TabDock Core
//!
//! Bottom tab navigation: a tab bar plus a page region, kept consistent with
//! a single selected index under taps, programmatic calls and restoration.

mod config;
mod container;
mod control;
mod coverage;
mod error;
mod lock;
mod page;
mod presenter;
mod view;

pub use config::Config;
pub use container::TabContainer;
pub use control::{ContainerHandle, TabControl};
pub use coverage::Coverage;
pub use error::CoreError;
pub use lock::LayoutLock;
pub use page::{
    HeadlessPageRegion, NavigationDirection, NavigationStackState, PageRegion, PageTransition,
    TransitionStatus,
};
pub use view::{BarLayer, BarPresentation, HeadlessTabBar, TabBarSnapshot, TabBarView};

// Re-export the building blocks hosts need
pub use tabdock_routes::{
    PageHandle, Route, RouteError, RouteTable, SelectionDecision, SelectionRequest,
    TabItemConfiguration, Trigger,
};
pub use tabdock_selection::{
    AllowAll, AuthenticationGate, SelectionCallbacks, SelectionCoordinator, SelectionHandle,
    SelectionHandler, SelectionPolicy,
};
pub use tabdock_storage::{Database, MemoryStore, SelectionStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

/// Open the selection database named by `config`, creating its directory.
pub fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(Database::open(&config.database_path)?)
}
