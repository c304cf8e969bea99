use std::path::Path;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/encore/config.toml` or `~/.config/encore/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ENCORE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub import: ImportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Progress refresh interval (milliseconds). Must be >= 1.
    pub progress_tick_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_tick_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    /// An empty list accepts everything.
    pub extensions: Vec<String>,
    /// Optional cap on imported file size, in bytes.
    pub max_file_bytes: Option<u64>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            max_file_bytes: None,
        }
    }
}

impl ImportSettings {
    /// Whether a source with this name passes the extension filter.
    ///
    /// Names without an extension are accepted; the container sniff in
    /// the extractor is the real gate there.
    pub fn allows_extension_of(&self, name: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => true,
        }
    }
}
