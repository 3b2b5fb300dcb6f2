//! Lyra Player - Playback Session Management
//!
//! Platform-agnostic playback session controller for Lyra Player.
//!
//! This crate provides:
//! - Play-state machine (Stopped / Playing / Paused)
//! - Play queue with a current-position cursor and auto-advance
//! - Favorite and selection sets published as fresh snapshots
//! - Observable state for presentation layers (via `lyra-observe`)
//! - A narrow [`MediaEngine`] trait for the actual playback device
//!
//! # Architecture
//!
//! `lyra-playback` is completely platform-agnostic: no audio decoding, no
//! UI, no storage. The platform supplies a [`MediaEngine`] implementation
//! and a read-only song catalog at construction; the controller owns
//! everything else. The engine's end-of-track notification is marshaled
//! back onto the control thread by platform glue and delivered as
//! [`PlaybackController::on_engine_completion`].
//!
//! # Example
//!
//! ```rust,no_run
//! use lyra_playback::{
//!     Catalog, MediaEngine, PlaybackController, Result, SessionConfig, Song,
//! };
//! use std::path::{Path, PathBuf};
//! use std::time::Duration;
//!
//! struct SystemEngine;
//!
//! impl MediaEngine for SystemEngine {
//!     fn load(&mut self, _source_path: &Path) -> Result<()> { Ok(()) }
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn resume(&mut self) {}
//!     fn seek(&mut self, _position: Duration) -> Result<()> { Ok(()) }
//!     fn release(&mut self) {}
//!     fn set_on_completion(&mut self, _callback: lyra_playback::CompletionCallback) {}
//! }
//!
//! let catalog = Catalog::new(vec![Song {
//!     id: "1".to_string(),
//!     title: "Song 1".to_string(),
//!     artist: "Artist A".to_string(),
//!     duration: Duration::from_secs(180),
//!     source_path: PathBuf::from("/music/1.mp3"),
//! }]);
//!
//! let mut controller =
//!     PlaybackController::new(catalog, Box::new(SystemEngine), SessionConfig::default());
//!
//! controller.enqueue("1")?;
//! controller.play("1")?;
//! controller.pause();
//! controller.teardown();
//! # Ok::<(), lyra_playback::PlaybackError>(())
//! ```

mod catalog;
mod controller;
mod engine;
mod error;
mod queue;
pub mod types;

// Public exports
pub use catalog::Catalog;
pub use controller::PlaybackController;
pub use engine::{CompletionCallback, MediaEngine};
pub use error::{PlaybackError, Result};
pub use queue::PlayQueue;
pub use types::{PlayState, SessionConfig, Song};
