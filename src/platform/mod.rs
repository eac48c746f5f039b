//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard state snapshot)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::{Key, Keyboard};
pub use storage::{KeyValueStore, MemoryStore, StorageError};

#[cfg(test)]
pub use storage::FailingStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
