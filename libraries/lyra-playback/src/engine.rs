//! Platform-agnostic media engine trait
//!
//! Abstracts the actual decode/playback device. The controller borrows an
//! engine for its whole lifetime: acquired at construction, released by
//! [`teardown`](crate::PlaybackController::teardown).

use crate::error::Result;
use std::path::Path;
use std::time::Duration;

/// Callback invoked by the platform when a track finishes naturally.
///
/// The engine fires it exactly once per finished track, on an engine-owned
/// thread or callback context. Platform glue is responsible for marshaling
/// it back onto the controller's single control thread before calling
/// [`on_engine_completion`](crate::PlaybackController::on_engine_completion);
/// the core never touches shared state from the raw callback.
pub type CompletionCallback = Box<dyn FnMut() + Send>;

/// Playback device capability.
///
/// Implementors wrap the platform media stack (a system media player, a
/// decoder + output pair, a test stub). All methods are synchronous from
/// the controller's point of view; `load` may start asynchronous work
/// internally as long as `play` after a successful `load` is valid.
pub trait MediaEngine {
    /// Prepare the track at `source_path` for playback.
    fn load(&mut self, source_path: &Path) -> Result<()>;

    /// Start playback of the loaded track.
    fn play(&mut self) -> Result<()>;

    /// Pause playback. Harmless if nothing is playing.
    fn pause(&mut self);

    /// Resume paused playback. Harmless if nothing is paused.
    fn resume(&mut self);

    /// Seek within the current track.
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Release all device resources. The engine is unusable afterwards.
    fn release(&mut self);

    /// Register the natural end-of-track notification.
    fn set_on_completion(&mut self, callback: CompletionCallback);
}

/// Call log shared between a [`StubEngine`] and the test that built it.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct EngineLog {
    pub loaded: Vec<std::path::PathBuf>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub resume_calls: usize,
    pub seeks: Vec<Duration>,
    pub release_calls: usize,
}

/// Recording stub engine for controller tests.
///
/// The stub itself moves into the controller as a boxed trait object; the
/// shared log stays with the test for assertions on the exact interaction.
#[cfg(test)]
pub(crate) struct StubEngine {
    log: std::rc::Rc<std::cell::RefCell<EngineLog>>,
    completion: Option<CompletionCallback>,
}

#[cfg(test)]
impl StubEngine {
    pub fn new() -> (Self, std::rc::Rc<std::cell::RefCell<EngineLog>>) {
        let log = std::rc::Rc::new(std::cell::RefCell::new(EngineLog::default()));
        (
            Self {
                log: std::rc::Rc::clone(&log),
                completion: None,
            },
            log,
        )
    }
}

#[cfg(test)]
impl MediaEngine for StubEngine {
    fn load(&mut self, source_path: &Path) -> Result<()> {
        self.log.borrow_mut().loaded.push(source_path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.log.borrow_mut().play_calls += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().pause_calls += 1;
    }

    fn resume(&mut self) {
        self.log.borrow_mut().resume_calls += 1;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.log.borrow_mut().seeks.push(position);
        Ok(())
    }

    fn release(&mut self) {
        self.log.borrow_mut().release_calls += 1;
    }

    fn set_on_completion(&mut self, callback: CompletionCallback) {
        self.completion = Some(callback);
    }
}
