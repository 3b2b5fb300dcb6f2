//! Playback session controller - core orchestration
//!
//! Coordinates the play-state machine, the queue, the favorite/selection
//! sets, and the media engine. All observable state lives here; the
//! presentation layer subscribes through the accessors and never mutates.

use crate::{
    catalog::Catalog,
    engine::MediaEngine,
    error::{PlaybackError, Result},
    queue::PlayQueue,
    types::{PlayState, SessionConfig, Song},
};
use lyra_observe::{ObservableValue, Observer, SubscriptionId};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Central playback session controller.
///
/// Owns the queue, the state machine, and all observable state. The media
/// engine handle is held for the controller's whole lifetime and released
/// exactly once by [`teardown`](Self::teardown).
///
/// Single-owner by design: every mutating operation takes `&mut self` and
/// must run on one logical control thread. The engine's completion
/// notification arrives as an [`on_engine_completion`](Self::on_engine_completion)
/// call after platform glue marshals it back onto that thread.
pub struct PlaybackController {
    // Collaborators
    catalog: Catalog,
    engine: Box<dyn MediaEngine>,

    // Queue
    queue: PlayQueue,

    // Observable state
    play_state: ObservableValue<PlayState>,
    current_song: ObservableValue<Option<Song>>,
    favorites: ObservableValue<HashSet<String>>,
    selections: ObservableValue<HashSet<Song>>,

    // Teardown guard
    released: bool,
}

impl PlaybackController {
    /// Create a controller over a catalog and an engine handle.
    pub fn new(catalog: Catalog, engine: Box<dyn MediaEngine>, config: SessionConfig) -> Self {
        let favorites: HashSet<String> = config
            .initial_favorites
            .into_iter()
            .filter(|id| catalog.contains(id))
            .collect();

        Self {
            catalog,
            engine,
            queue: PlayQueue::new(),
            play_state: ObservableValue::new(PlayState::Stopped),
            current_song: ObservableValue::new(None),
            favorites: ObservableValue::new(favorites),
            selections: ObservableValue::new(HashSet::new()),
            released: false,
        }
    }

    // ===== Playback Control =====

    /// Start playing the catalog song with this id.
    ///
    /// An unknown id is reported as [`PlaybackError::SongNotFound`] with
    /// zero state change. If the song is also in the queue, the queue
    /// cursor moves to it so auto-advance continues from there.
    pub fn play(&mut self, song_id: &str) -> Result<()> {
        self.ensure_engine()?;

        let Some(song) = self.catalog.get(song_id).cloned() else {
            warn!(song_id, "play rejected: song not in catalog");
            return Err(PlaybackError::SongNotFound(song_id.to_string()));
        };

        // Align the queue cursor when the song is queued; a miss leaves
        // the cursor where it was.
        self.queue.jump_to(song_id);

        self.engine.load(&song.source_path)?;
        self.engine.play()?;

        debug!(song_id = %song.id, title = %song.title, "playing");
        self.current_song.set(Some(song));
        self.play_state.set(PlayState::Playing);
        Ok(())
    }

    /// Pause playback.
    ///
    /// Only valid while `Playing`; anywhere else this is an idempotent
    /// no-op, not a failure. The engine is an external device that may
    /// report stale readiness, so out-of-state calls must never corrupt
    /// the state machine.
    pub fn pause(&mut self) {
        if *self.play_state.get() != PlayState::Playing {
            debug!(state = ?self.play_state.get(), "pause ignored");
            return;
        }
        self.engine.pause();
        self.play_state.set(PlayState::Paused);
    }

    /// Resume playback.
    ///
    /// Valid from `Paused`, or from `Stopped` when a song is still loaded.
    /// Any other situation is a no-op.
    pub fn resume(&mut self) {
        let resumable = match self.play_state.get() {
            PlayState::Paused => true,
            PlayState::Stopped => self.current_song.get().is_some(),
            PlayState::Playing => false,
        };
        if !resumable || self.released {
            debug!(state = ?self.play_state.get(), "resume ignored");
            return;
        }
        self.engine.resume();
        self.play_state.set(PlayState::Playing);
    }

    /// Seek within the current track.
    ///
    /// Delegates to the engine only while `Playing`; no state transition
    /// either way.
    pub fn seek_to(&mut self, position: Duration) -> Result<()> {
        if *self.play_state.get() != PlayState::Playing {
            debug!(state = ?self.play_state.get(), "seek ignored");
            return Ok(());
        }
        self.engine.seek(position)
    }

    /// Consume the engine's natural end-of-track notification.
    ///
    /// Advances the queue: the next song loads and keeps playing, the end
    /// of the queue stops playback and clears the current song. Must be
    /// called on the control thread (platform glue marshals the raw engine
    /// callback here).
    pub fn on_engine_completion(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }

        if let Some(next) = self.queue.advance().cloned() {
            self.engine.load(&next.source_path)?;
            self.engine.play()?;

            debug!(song_id = %next.id, "auto-advanced to next song");
            self.current_song.set(Some(next));
            self.play_state.set(PlayState::Playing);
        } else {
            debug!("end of queue reached");
            self.current_song.set(None);
            self.play_state.set(PlayState::Stopped);
        }
        Ok(())
    }

    /// Release the engine and stop the session. Terminal and idempotent:
    /// the engine handle is released exactly once no matter how many times
    /// this runs.
    pub fn teardown(&mut self) {
        if !self.released {
            self.engine.release();
            self.released = true;
            debug!("media engine released");
        }
        if *self.play_state.get() != PlayState::Stopped {
            self.play_state.set(PlayState::Stopped);
        }
        if self.current_song.get().is_some() {
            self.current_song.set(None);
        }
    }

    fn ensure_engine(&self) -> Result<()> {
        if self.released {
            Err(PlaybackError::EngineReleased)
        } else {
            Ok(())
        }
    }

    // ===== Queue Management =====

    /// Append a catalog song to the play queue.
    ///
    /// Unknown ids are rejected the same way [`play`](Self::play) rejects
    /// them. Enqueuing into an empty queue publishes the new head as the
    /// current song (without starting playback).
    pub fn enqueue(&mut self, song_id: &str) -> Result<()> {
        let Some(song) = self.catalog.get(song_id).cloned() else {
            return Err(PlaybackError::SongNotFound(song_id.to_string()));
        };

        let was_empty = self.queue.is_empty();
        self.queue.enqueue(song);

        if was_empty {
            let head = self.queue.current().cloned();
            self.current_song.set(head);
        }
        Ok(())
    }

    /// The play queue, read-only.
    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    // ===== Favorites & Selections =====

    /// Add the id to the favorites if absent, remove it if present.
    ///
    /// Requires the song to exist in the catalog; otherwise nothing
    /// changes. Every mutation publishes a fresh snapshot so observers
    /// holding a previously delivered set never see it change under them.
    pub fn toggle_favorite(&mut self, song_id: &str) {
        if !self.catalog.contains(song_id) {
            warn!(song_id, "toggle_favorite ignored: song not in catalog");
            return;
        }

        let mut next = self.favorites.snapshot();
        if !next.remove(song_id) {
            next.insert(song_id.to_string());
        }
        self.favorites.set(next);
    }

    /// Add a song to the selection set. Fresh snapshot on publish.
    pub fn add_selection(&mut self, song: Song) {
        let mut next = self.selections.snapshot();
        next.insert(song);
        self.selections.set(next);
    }

    /// Remove a song from the selection set. Fresh snapshot on publish.
    pub fn remove_selection(&mut self, song: &Song) {
        let mut next = self.selections.snapshot();
        next.remove(song);
        self.selections.set(next);
    }

    /// Empty the selection set.
    pub fn clear_selections(&mut self) {
        self.selections.set(HashSet::new());
    }

    // ===== Observable State =====

    /// Current play state.
    pub fn play_state(&self) -> PlayState {
        *self.play_state.get()
    }

    /// Current song, if any.
    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.get().as_ref()
    }

    /// Favorite song ids.
    pub fn favorites(&self) -> &HashSet<String> {
        self.favorites.get()
    }

    /// Selected songs.
    pub fn selections(&self) -> &HashSet<Song> {
        self.selections.get()
    }

    /// Subscribe to play-state changes (replay-latest).
    pub fn subscribe_play_state(
        &mut self,
        observer: Box<dyn Observer<PlayState>>,
    ) -> SubscriptionId {
        self.play_state.subscribe(observer)
    }

    /// Stop a play-state subscription.
    pub fn unsubscribe_play_state(&mut self, id: SubscriptionId) -> bool {
        self.play_state.unsubscribe(id)
    }

    /// Subscribe to current-song changes (replay-latest).
    pub fn subscribe_current_song(
        &mut self,
        observer: Box<dyn Observer<Option<Song>>>,
    ) -> SubscriptionId {
        self.current_song.subscribe(observer)
    }

    /// Stop a current-song subscription.
    pub fn unsubscribe_current_song(&mut self, id: SubscriptionId) -> bool {
        self.current_song.unsubscribe(id)
    }

    /// Subscribe to favorite-set snapshots (replay-latest).
    pub fn subscribe_favorites(
        &mut self,
        observer: Box<dyn Observer<HashSet<String>>>,
    ) -> SubscriptionId {
        self.favorites.subscribe(observer)
    }

    /// Stop a favorites subscription.
    pub fn unsubscribe_favorites(&mut self, id: SubscriptionId) -> bool {
        self.favorites.unsubscribe(id)
    }

    /// Subscribe to selection-set snapshots (replay-latest).
    pub fn subscribe_selections(
        &mut self,
        observer: Box<dyn Observer<HashSet<Song>>>,
    ) -> SubscriptionId {
        self.selections.subscribe(observer)
    }

    /// Stop a selections subscription.
    pub fn unsubscribe_selections(&mut self, id: SubscriptionId) -> bool {
        self.selections.unsubscribe(id)
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        // Teardown is explicit API; this is only the backstop for a
        // controller dropped without one.
        if !self.released {
            self.engine.release();
            self.released = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineLog, StubEngine};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn song(id: &str) -> Song {
        Song {
            id: id.to_string(),
            title: format!("Song {}", id),
            artist: "Artist A".to_string(),
            duration: Duration::from_secs(180),
            source_path: PathBuf::from(format!("/music/{}.mp3", id)),
        }
    }

    fn controller_with(ids: &[&str]) -> (PlaybackController, Rc<RefCell<EngineLog>>) {
        let catalog = Catalog::new(ids.iter().map(|id| song(id)).collect());
        let (engine, log) = StubEngine::new();
        let controller =
            PlaybackController::new(catalog, Box::new(engine), SessionConfig::default());
        (controller, log)
    }

    /// Queue up the whole catalog in order.
    fn enqueue_all(controller: &mut PlaybackController, ids: &[&str]) {
        for id in ids {
            controller.enqueue(id).unwrap();
        }
    }

    #[test]
    fn initial_state() {
        let (controller, _) = controller_with(&["a"]);
        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert!(controller.current_song().is_none());
        assert!(controller.favorites().is_empty());
        assert!(controller.selections().is_empty());
    }

    #[test]
    fn play_known_song() {
        let (mut controller, log) = controller_with(&["a", "b"]);

        controller.play("b").unwrap();

        assert_eq!(controller.play_state(), PlayState::Playing);
        assert_eq!(controller.current_song().unwrap().id, "b");
        assert_eq!(log.borrow().loaded, vec![PathBuf::from("/music/b.mp3")]);
        assert_eq!(log.borrow().play_calls, 1);
    }

    #[test]
    fn play_unknown_song_changes_nothing() {
        let (mut controller, log) = controller_with(&["a"]);

        let err = controller.play("nope").unwrap_err();
        assert!(matches!(err, PlaybackError::SongNotFound(id) if id == "nope"));
        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert!(controller.current_song().is_none());
        assert!(log.borrow().loaded.is_empty());
    }

    #[test]
    fn pause_and_resume_cycle() {
        let (mut controller, log) = controller_with(&["a"]);
        controller.play("a").unwrap();

        controller.pause();
        assert_eq!(controller.play_state(), PlayState::Paused);
        assert_eq!(log.borrow().pause_calls, 1);

        controller.resume();
        assert_eq!(controller.play_state(), PlayState::Playing);
        assert_eq!(log.borrow().resume_calls, 1);
    }

    #[test]
    fn pause_while_stopped_is_a_no_op() {
        let (mut controller, log) = controller_with(&["a"]);

        controller.pause();

        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert_eq!(log.borrow().pause_calls, 0);
    }

    #[test]
    fn resume_without_loaded_song_is_a_no_op() {
        let (mut controller, log) = controller_with(&["a"]);

        controller.resume();

        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert_eq!(log.borrow().resume_calls, 0);
    }

    #[test]
    fn resume_from_stopped_with_loaded_song() {
        let (mut controller, log) = controller_with(&["a"]);
        controller.enqueue("a").unwrap();

        // Head of queue published as current song, playback not started
        assert_eq!(controller.current_song().unwrap().id, "a");
        assert_eq!(controller.play_state(), PlayState::Stopped);

        controller.resume();
        assert_eq!(controller.play_state(), PlayState::Playing);
        assert_eq!(log.borrow().resume_calls, 1);
    }

    #[test]
    fn seek_only_while_playing() {
        let (mut controller, log) = controller_with(&["a"]);

        controller.seek_to(Duration::from_secs(30)).unwrap();
        assert!(log.borrow().seeks.is_empty());

        controller.play("a").unwrap();
        controller.seek_to(Duration::from_secs(30)).unwrap();
        assert_eq!(log.borrow().seeks, vec![Duration::from_secs(30)]);
        assert_eq!(controller.play_state(), PlayState::Playing);
    }

    #[test]
    fn completion_advances_through_queue_then_stops() {
        let ids = ["a", "b", "c"];
        let (mut controller, log) = controller_with(&ids);
        enqueue_all(&mut controller, &ids);

        // Start mid-queue: cursor follows the played song
        controller.play("b").unwrap();
        assert_eq!(controller.queue().cursor(), Some(1));

        controller.on_engine_completion().unwrap();
        assert_eq!(controller.current_song().unwrap().id, "c");
        assert_eq!(controller.queue().cursor(), Some(2));
        assert_eq!(controller.play_state(), PlayState::Playing);

        // End of queue: stop and clear
        controller.on_engine_completion().unwrap();
        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert!(controller.current_song().is_none());
        assert_eq!(controller.queue().cursor(), Some(2));

        assert_eq!(
            log.borrow().loaded,
            vec![
                PathBuf::from("/music/b.mp3"),
                PathBuf::from("/music/c.mp3"),
            ]
        );
    }

    #[test]
    fn completion_with_empty_queue_stops() {
        let (mut controller, _) = controller_with(&["a"]);
        controller.play("a").unwrap();

        controller.on_engine_completion().unwrap();

        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert!(controller.current_song().is_none());
    }

    #[test]
    fn enqueue_unknown_song_is_rejected() {
        let (mut controller, _) = controller_with(&["a"]);
        assert!(matches!(
            controller.enqueue("nope"),
            Err(PlaybackError::SongNotFound(_))
        ));
        assert!(controller.queue().is_empty());
    }

    #[test]
    fn teardown_releases_engine_exactly_once() {
        let (mut controller, log) = controller_with(&["a"]);
        controller.play("a").unwrap();

        controller.teardown();
        controller.teardown();
        controller.teardown();

        assert_eq!(log.borrow().release_calls, 1);
        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert!(controller.current_song().is_none());
    }

    #[test]
    fn drop_releases_engine_if_teardown_was_skipped() {
        let (controller, log) = controller_with(&["a"]);
        drop(controller);
        assert_eq!(log.borrow().release_calls, 1);
    }

    #[test]
    fn drop_after_teardown_does_not_double_release() {
        let (mut controller, log) = controller_with(&["a"]);
        controller.teardown();
        drop(controller);
        assert_eq!(log.borrow().release_calls, 1);
    }

    #[test]
    fn operations_after_teardown_are_inert() {
        let (mut controller, log) = controller_with(&["a"]);
        controller.teardown();

        assert!(matches!(
            controller.play("a"),
            Err(PlaybackError::EngineReleased)
        ));
        controller.resume();
        controller.on_engine_completion().unwrap();

        assert_eq!(controller.play_state(), PlayState::Stopped);
        assert_eq!(log.borrow().play_calls, 0);
        assert_eq!(log.borrow().resume_calls, 0);
    }

    #[test]
    fn toggle_favorite_is_its_own_inverse() {
        let (mut controller, _) = controller_with(&["a", "b"]);

        controller.toggle_favorite("a");
        assert!(controller.favorites().contains("a"));

        controller.toggle_favorite("a");
        assert!(controller.favorites().is_empty());
    }

    #[test]
    fn toggle_favorite_unknown_song_is_a_no_op() {
        let (mut controller, _) = controller_with(&["a"]);
        controller.toggle_favorite("nope");
        assert!(controller.favorites().is_empty());
    }

    #[test]
    fn favorite_mutations_publish_fresh_snapshots() {
        let (mut controller, _) = controller_with(&["a", "b"]);

        let published = Rc::new(RefCell::new(Vec::<HashSet<String>>::new()));
        let sink = Rc::clone(&published);
        controller.subscribe_favorites(Box::new(lyra_observe::FnObserver::new(
            move |set: &HashSet<String>| sink.borrow_mut().push(set.clone()),
        )));

        controller.toggle_favorite("a");
        controller.toggle_favorite("b");

        // Replay + two mutations; earlier deliveries must not have been
        // mutated in place after the fact.
        let published = published.borrow();
        assert_eq!(published.len(), 3);
        assert!(published[0].is_empty());
        assert_eq!(published[1].len(), 1);
        assert_eq!(published[2].len(), 2);
    }

    #[test]
    fn selection_add_remove_clear() {
        let (mut controller, _) = controller_with(&["a", "b"]);

        controller.add_selection(song("a"));
        controller.add_selection(song("b"));
        assert_eq!(controller.selections().len(), 2);

        controller.remove_selection(&song("a"));
        assert_eq!(controller.selections().len(), 1);
        assert!(controller.selections().contains(&song("b")));

        controller.clear_selections();
        assert!(controller.selections().is_empty());
    }

    #[test]
    fn initial_favorites_filtered_against_catalog() {
        let catalog = Catalog::new(vec![song("a"), song("b")]);
        let (engine, _) = StubEngine::new();
        let config = SessionConfig {
            initial_favorites: vec!["a".to_string(), "ghost".to_string()],
        };

        let controller = PlaybackController::new(catalog, Box::new(engine), config);

        assert!(controller.favorites().contains("a"));
        assert!(!controller.favorites().contains("ghost"));
        assert_eq!(controller.favorites().len(), 1);
    }

    #[test]
    fn play_state_subscription_sees_transitions_in_order() {
        let (mut controller, _) = controller_with(&["a"]);

        let states: Rc<RefCell<Vec<PlayState>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let sub = controller.subscribe_play_state(Box::new(lyra_observe::FnObserver::new(
            move |state: &PlayState| sink.borrow_mut().push(*state),
        )));

        controller.play("a").unwrap();
        controller.pause();
        controller.resume();
        controller.unsubscribe_play_state(sub);
        controller.teardown();

        assert_eq!(
            *states.borrow(),
            vec![
                PlayState::Stopped, // replay-latest on subscribe
                PlayState::Playing,
                PlayState::Paused,
                PlayState::Playing,
            ]
        );
    }
}
