use std::sync::mpsc::{self, Receiver, Sender};

use thiserror::Error;
use tracing::debug;

use super::model::{SongId, SongRecord};

/// Insert rejected: the library already holds a song with this title.
///
/// Titles are the dedup key, compared exactly and case-sensitively.
#[derive(Debug, Error)]
#[error("a song titled {title:?} is already in the library")]
pub struct DuplicateSong {
    pub title: String,
}

/// The given position does not name a current library entry.
#[derive(Debug, Error)]
#[error("position {position} is out of range for a library of {len} songs")]
pub struct OutOfRange {
    pub position: usize,
    pub len: usize,
}

/// Change notification, sent after each successful mutation.
#[derive(Debug, Clone)]
pub enum LibraryEvent {
    Inserted {
        position: usize,
        id: SongId,
        title: String,
    },
    Removed {
        position: usize,
        id: SongId,
    },
}

/// Ordered collection of songs; insertion order drives display and
/// skip wraparound. The only mutations are `insert` and `remove_at`.
#[derive(Debug, Default)]
pub struct SongLibrary {
    songs: Vec<SongRecord>,
    subscribers: Vec<Sender<LibraryEvent>>,
}

impl SongLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, rejecting title collisions.
    pub fn insert(&mut self, record: SongRecord) -> Result<usize, DuplicateSong> {
        if self.contains_title(record.title()) {
            return Err(DuplicateSong {
                title: record.title().to_string(),
            });
        }

        let position = self.songs.len();
        let event = LibraryEvent::Inserted {
            position,
            id: record.id(),
            title: record.title().to_string(),
        };
        debug!(title = record.title(), position, "library insert");
        self.songs.push(record);
        self.notify(event);
        Ok(position)
    }

    /// Remove and return the record at `position`.
    pub fn remove_at(&mut self, position: usize) -> Result<SongRecord, OutOfRange> {
        if position >= self.songs.len() {
            return Err(OutOfRange {
                position,
                len: self.songs.len(),
            });
        }

        let record = self.songs.remove(position);
        debug!(title = record.title(), position, "library remove");
        self.notify(LibraryEvent::Removed {
            position,
            id: record.id(),
        });
        Ok(record)
    }

    pub fn get(&self, position: usize) -> Option<&SongRecord> {
        self.songs.get(position)
    }

    pub fn count(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SongRecord> {
        self.songs.iter()
    }

    /// Exact, case-sensitive title lookup (the dedup rule).
    pub fn contains_title(&self, title: &str) -> bool {
        self.songs.iter().any(|s| s.title() == title)
    }

    /// Current position of the song with the given id, if it still exists.
    pub fn position_of(&self, id: SongId) -> Option<usize> {
        self.songs.iter().position(|s| s.id() == id)
    }

    /// Subscribe to change events. The channel is pruned once the
    /// receiver is dropped.
    pub fn subscribe(&mut self) -> Receiver<LibraryEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: LibraryEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
