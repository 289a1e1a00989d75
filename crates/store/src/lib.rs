//! Storage module - the persistence boundary of the game
//!
//! The rules in `tap-merge-core` decide *what* to persist (a versioned
//! [`SaveRecord`](tap_merge_core::SaveRecord)); this crate decides *where*.
//!
//! # Layers
//!
//! - [`KeyValueStore`]: minimal byte-oriented key-value interface a host provides
//! - [`MemoryStore`]: in-process store, shareable between handles (tests, ephemeral sessions)
//! - [`FileStore`]: one JSON file per key inside a directory, written atomically
//! - [`progress`]: load/save/clear helpers for the progress record
//!
//! # Failure Policy
//!
//! Store implementations report failures through `anyhow::Result`. The progress
//! helpers never propagate them: a failed or outdated load behaves like a missing
//! record, and a failed save is logged and dropped. Progress is a convenience,
//! not something worth interrupting a round for.
//!
//! # Example
//!
//! ```
//! use tap_merge_core::Progression;
//! use tap_merge_store::{progress, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! assert!(progress::load_progress(&store).is_none());
//!
//! let mut p = Progression::new();
//! p.unlock_next(1);
//! assert!(progress::save_progress(&mut store, &p.to_save_record()));
//!
//! let restored = Progression::restore(progress::load_progress(&store));
//! assert!(restored.is_unlocked(2));
//! ```

pub mod file;
pub mod memory;
pub mod progress;

pub use tap_merge_core as core;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Byte-oriented key-value storage provided by the host
pub trait KeyValueStore: Send {
    /// Read the value under `key`; `Ok(None)` when absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete `key`; deleting an absent key succeeds
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
