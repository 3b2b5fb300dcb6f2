//! Error types for playback session management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Song id unknown to the catalog
    #[error("Song not found: {0}")]
    SongNotFound(String),

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Media engine reported a failure
    #[error("Media engine error: {0}")]
    Engine(String),

    /// Operation after teardown released the engine
    #[error("Media engine already released")]
    EngineReleased,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
