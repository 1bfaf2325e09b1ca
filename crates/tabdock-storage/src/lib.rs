//! TabDock Storage Layer
//!
//! Persists the selected tab index under a caller-supplied key so a
//! container can restore its selection on the next launch.

mod database;
mod error;
mod memory;
mod migrations;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// A single integer keyed by string, written on every committed selection
/// and read back once at first layout.
pub trait SelectionStore: Send {
    /// Returns the persisted index for `key`, or `None` if nothing usable is stored.
    fn load_index(&self, key: &str) -> Result<Option<usize>>;

    fn save_index(&self, key: &str, index: usize) -> Result<()>;
}
