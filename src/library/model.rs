use std::fmt;
use std::time::Duration;

use uuid::Uuid;

/// Opaque identity of a song, assigned at creation and never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SongId(Uuid);

impl SongId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One imported song: immutable identity and audio bytes, plus the
/// metadata the extractor pulled out of the container.
#[derive(Clone)]
pub struct SongRecord {
    id: SongId,
    pub(crate) title: String,
    pub(crate) artist: Option<String>,
    pub(crate) cover_art: Option<Vec<u8>>,
    pub(crate) duration: Option<Duration>,
    audio_data: Vec<u8>,
}

impl SongRecord {
    /// Create a record from a title and the full audio byte buffer.
    ///
    /// A blank title falls back to `"UNKNOWN"`; the title is the dedup
    /// key and must never be empty.
    pub fn new(title: impl Into<String>, audio_data: Vec<u8>) -> Self {
        let mut title = title.into();
        if title.trim().is_empty() {
            title = "UNKNOWN".to_string();
        }
        Self {
            id: SongId::new(),
            title,
            artist: None,
            cover_art: None,
            duration: None,
            audio_data,
        }
    }

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// `None` means "unknown", never an empty string.
    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    pub fn cover_art(&self) -> Option<&[u8]> {
        self.cover_art.as_deref()
    }

    /// Duration extracted at import time. The live decode session's
    /// probed duration is authoritative over this value.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// The raw audio file contents; never mutated after creation.
    pub fn audio_data(&self) -> &[u8] {
        &self.audio_data
    }

    /// "Artist - Title" when an artist is known, otherwise the title.
    pub fn display(&self) -> String {
        match self.artist.as_deref() {
            Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), self.title),
            _ => self.title.clone(),
        }
    }
}

impl fmt::Debug for SongRecord {
    // audio_data can be megabytes of samples; show its size only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SongRecord")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("artist", &self.artist)
            .field("cover_art_bytes", &self.cover_art.as_ref().map(Vec::len))
            .field("duration", &self.duration)
            .field("audio_bytes", &self.audio_data.len())
            .finish()
    }
}

/// Format a duration as `m:ss` for display.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
