//! Playback small types: state, errors, and the shared snapshot handle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use crate::library::SongId;

/// The transport state. There is a current track exactly when the
/// state is not `Idle`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// The audio engine could not turn the buffer into a session.
#[derive(Debug, Error)]
#[error("audio engine could not load the track: {0}")]
pub struct DecodeError(pub String);

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The index does not name a current library entry; playback state
    /// is left unchanged.
    #[error("track index {0} is out of range")]
    InvalidIndex(usize),
    /// The id no longer names a library entry.
    #[error("song {0} is no longer in the library")]
    UnknownSong(SongId),
    /// Loading failed; the controller recovered to Idle.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Observable playback state, refreshed after every controller
/// mutation and on each progress tick.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub track_index: Option<usize>,
    pub cursor: Duration,
    pub total: Duration,
}

/// Shared handle for observers (the presentation layer polls this).
pub type PlaybackHandle = Arc<Mutex<PlaybackSnapshot>>;
