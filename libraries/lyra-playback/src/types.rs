//! Core types for playback session management

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::Duration;

/// A playable track.
///
/// Immutable value entity created at catalog-load time and never mutated;
/// a catalog replacement is the only thing that destroys one.
///
/// Equality and hashing go by `id` only: two `Song` values with the same id
/// are the same track regardless of metadata, which is what favorite and
/// selection sets rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Unique, stable track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Track duration
    pub duration: Duration,

    /// File path handed to the media engine for decoding
    pub source_path: PathBuf,
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Playback state
///
/// Exactly one value at any time, held in an observable and mutated only by
/// the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayState {
    /// No track playing
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Configuration for a playback session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Favorite song ids restored from a previous session (default: empty)
    pub initial_favorites: Vec<String>,
}
