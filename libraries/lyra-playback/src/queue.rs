//! Play queue with a current-position cursor
//!
//! Ordered sequence of songs plus a cursor marking the active entry.
//! Mutated only by enqueue and cursor moves; never reordered implicitly.

use crate::types::Song;

/// Ordered play queue.
///
/// Invariant: `cursor` is `None` exactly when the queue is empty, and
/// always within bounds otherwise. [`advance`](Self::advance) stops at the
/// last element (no wraparound).
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    songs: Vec<Song>,
    cursor: Option<usize>,
}

impl PlayQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self {
            songs: Vec::new(),
            cursor: None,
        }
    }

    /// Append a song to the end of the queue.
    ///
    /// The first enqueue makes the new song current.
    pub fn enqueue(&mut self, song: Song) {
        self.songs.push(song);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
    }

    /// The song at the cursor, if any.
    pub fn current(&self) -> Option<&Song> {
        self.cursor.map(|index| &self.songs[index])
    }

    /// Move the cursor to the next song and return it.
    ///
    /// At the end of the queue this is a pure no-op returning `None`; the
    /// cursor stays on the last element.
    pub fn advance(&mut self) -> Option<&Song> {
        let index = self.cursor?;
        if index + 1 >= self.songs.len() {
            return None;
        }
        self.cursor = Some(index + 1);
        Some(&self.songs[index + 1])
    }

    /// Move the cursor to the first song with this id and return it.
    ///
    /// A miss returns `None` and leaves the cursor where it was.
    pub fn jump_to(&mut self, song_id: &str) -> Option<&Song> {
        let index = self.songs.iter().position(|song| song.id == song_id)?;
        self.cursor = Some(index);
        Some(&self.songs[index])
    }

    /// Current cursor position, if the queue is non-empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All queued songs, in order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Number of songs in the queue.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
