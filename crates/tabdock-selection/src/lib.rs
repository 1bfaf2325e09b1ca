//! TabDock Selection
//!
//! The coordinator is the single source of truth for which tab is selected.
//! A request is evaluated by a policy, and only an allowed request mutates
//! the selection before the commit hook runs:
//! ```text
//! request(to, trigger)
//!   ↓ out of range → false, no hooks
//! policy(request)
//!   ↓ Deny  → deny hook, false
//!   ↓ Allow → selected = to, commit hook, true
//! ```

mod coordinator;
mod handler;
mod policy;

pub use coordinator::{SelectionCoordinator, SelectionHandle};
pub use handler::{SelectionCallbacks, SelectionHandler};
pub use policy::{AllowAll, AuthenticationGate, SelectionPolicy};

pub use tabdock_routes::{Route, RouteTable, SelectionDecision, SelectionRequest, Trigger};
