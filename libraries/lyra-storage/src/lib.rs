//! Lyra Player - Storage
//!
//! Narrow persistence collaborators for the playback session:
//! - [`KeyValueStore`]: string key-value persistence behind a trait, with
//!   an in-memory implementation and a single-file JSON one.
//! - [`RecentEntries`]: bounded most-recent-first log of user input,
//!   persisted as a JSON array and capped at
//!   [`DEFAULT_RECENT_LIMIT`] entries.
//!
//! The playback core never depends on what backs the store; a corrupt
//! persisted payload resets to empty locally and never crashes a caller.
//!
//! # Example
//!
//! ```rust
//! use lyra_storage::{MemoryStore, RecentEntries};
//!
//! let mut log = RecentEntries::load(MemoryStore::new(), "history_key");
//!
//! log.record("queued the blue album")?;
//! log.record("searched: artist a")?;
//!
//! assert_eq!(log.entries()[0], "searched: artist a"); // newest first
//! # Ok::<(), lyra_storage::StorageError>(())
//! ```

mod error;
mod recent;
mod store;

// Public exports
pub use error::{Result, StorageError};
pub use recent::{RecentEntries, DEFAULT_RECENT_LIMIT};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
