//! Read-only song catalog
//!
//! The catalog provider hands the controller a fixed list of songs at
//! construction time; the core never refreshes it. Lookups are total:
//! a miss is `None`, never an error.

use crate::types::Song;

/// Immutable collection of the songs available to a session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Build a catalog from the provider's song list.
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Look up a song by id.
    pub fn get(&self, song_id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == song_id)
    }

    /// Whether a song with this id exists.
    pub fn contains(&self, song_id: &str) -> bool {
        self.get(song_id).is_some()
    }

    /// All songs, in catalog order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Number of songs in the catalog.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
