//! Bounded recent-entries log
//!
//! Ordered sequence of strings, newest first, capped at a fixed limit.
//! Persisted through a [`KeyValueStore`] as a JSON array; the stored shape
//! is the canonical format, a raw string set is not supported.

use crate::error::{Result, StorageError};
use crate::store::KeyValueStore;
use tracing::{debug, warn};

/// Default maximum number of retained entries.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Most-recent-first log with a hard size cap.
///
/// Blank input is rejected before anything mutates; overflowing entries are
/// silently dropped from the old end. A corrupt persisted payload resets
/// the store key and starts empty instead of surfacing an error.
pub struct RecentEntries<S> {
    store: S,
    key: String,
    limit: usize,
    entries: Vec<String>,
}

impl<S: KeyValueStore> RecentEntries<S> {
    /// Load the log persisted under `key`, with the default cap.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        Self::with_limit(store, key, DEFAULT_RECENT_LIMIT)
    }

    /// Load the log persisted under `key`, capped at `limit` entries.
    pub fn with_limit(mut store: S, key: impl Into<String>, limit: usize) -> Self {
        let key = key.into();

        let entries = match store.get(&key) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(limit);
                    entries
                }
                Err(error) => {
                    // Corrupt payload: reset the key, swallow the error
                    warn!(key = %key, %error, "corrupt recent-entries payload, resetting");
                    if let Err(remove_error) = store.remove(&key) {
                        warn!(key = %key, %remove_error, "failed to remove corrupt payload");
                    }
                    Vec::new()
                }
            },
        };

        Self {
            store,
            key,
            limit,
            entries,
        }
    }

    /// Record a new entry at the front of the log.
    ///
    /// Empty or whitespace-only text is rejected with
    /// [`StorageError::InvalidInput`] and nothing is mutated or persisted.
    pub fn record(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StorageError::InvalidInput);
        }

        self.entries.insert(0, text.to_string());
        self.entries.truncate(self.limit);

        self.persist()?;
        debug!(entry = text, total = self.entries.len(), "recorded entry");
        Ok(())
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drop all entries and the persisted key.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store.remove(&self.key)
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.entries)?;
        self.store.put(&self.key, &raw)
    }
}
