//! TabDock Routes
//!
//! The route table binds each tab's static configuration to an opaque page
//! handle. It is built once at startup and never mutated afterwards.

mod error;
mod request;
mod route;
mod table;

pub use error::RouteError;
pub use request::{SelectionDecision, SelectionRequest, Trigger};
pub use route::{PageHandle, Route, TabItemConfiguration};
pub use table::RouteTable;

pub type Result<T> = std::result::Result<T, RouteError>;
