use std::io::Cursor;
use std::path::Path;

use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use thiserror::Error;
use tracing::debug;

use crate::library::SongRecord;

/// Extraction failure. The buffer is rejected, nothing is produced.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The buffer is not a container format the decoder recognizes.
    #[error("unsupported container format")]
    UnsupportedFormat,
    /// The container was recognized but could not be parsed.
    #[error("malformed container: {0}")]
    Parse(#[from] lofty::error::LoftyError),
    #[error("could not read audio data: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a `SongRecord` from a raw audio buffer and its source name.
///
/// The title starts as the file stem of `source_name` and may be
/// overwritten by tag entries; entries are visited in container order
/// and the last value for a recognized key wins. Unrecognized keys are
/// ignored. The probed duration is independent of the tag walk and may
/// be absent.
pub fn extract(audio_data: Vec<u8>, source_name: &str) -> Result<SongRecord, ExtractError> {
    let probe = Probe::new(Cursor::new(audio_data.as_slice())).guess_file_type()?;
    if probe.file_type().is_none() {
        return Err(ExtractError::UnsupportedFormat);
    }
    let tagged = probe.read()?;

    let mut title = title_from_name(source_name);
    let mut artist: Option<String> = None;
    let mut cover_art: Option<Vec<u8>> = None;

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        for item in tag.items() {
            match item.key() {
                ItemKey::TrackTitle => {
                    if let Some(v) = item.value().text() {
                        let v = v.trim();
                        if !v.is_empty() {
                            title = v.to_string();
                        }
                    }
                }
                ItemKey::TrackArtist => {
                    if let Some(v) = item.value().text() {
                        let v = v.trim();
                        if !v.is_empty() {
                            artist = Some(v.to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(picture) = tag.pictures().last() {
            cover_art = Some(picture.data().to_vec());
        }
    }

    let probed = tagged.properties().duration();
    let duration = (!probed.is_zero()).then_some(probed);

    debug!(
        title,
        artist = artist.as_deref(),
        duration_secs = duration.map(|d| d.as_secs()),
        "extracted metadata"
    );

    let mut record = SongRecord::new(title, audio_data);
    record.artist = artist;
    record.cover_art = cover_art;
    record.duration = duration;
    Ok(record)
}

/// Default title: the source file name minus path and extension.
fn title_from_name(source_name: &str) -> String {
    Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}
