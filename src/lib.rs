//! encore — an in-memory music library and playback session core.
//!
//! The crate covers two coupled subsystems: the metadata ingestion
//! pipeline ([`import`], [`metadata`]), which turns a raw audio file
//! into a deduplicated [`library::SongRecord`], and the playback
//! controller ([`playback`]), a state machine that owns exactly one
//! active decode session and drives a periodic progress signal.
//!
//! [`session::PlayerSession`] ties the pieces together as the single
//! owning context; presentation, file choosing and audio rendering stay
//! outside (the latter behind [`playback::AudioEngine`]).

pub mod config;
pub mod import;
pub mod library;
pub mod metadata;
pub mod playback;
pub mod session;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Settings;
pub use import::{ImportError, ImportReport, ImportStatus, Importer, MediaSource, PathSource};
pub use library::{DuplicateSong, LibraryEvent, OutOfRange, SongId, SongLibrary, SongRecord};
pub use metadata::ExtractError;
pub use playback::{
    AudioEngine, DecodeError, PlaybackError, PlaybackHandle, PlaybackSnapshot, PlaybackState,
    PlayerController, ProgressClock, RodioEngine,
};
pub use session::PlayerSession;
