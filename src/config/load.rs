use std::{env, path::PathBuf};

use super::schema::Settings;

impl Settings {
    /// Load settings with the standard precedence: `ENCORE__` environment
    /// variables over an optional config file over struct defaults.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(config_file_path())
    }

    fn load_from(path: Option<PathBuf>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        let cfg = builder
            .add_source(
                ::config::Environment::with_prefix("ENCORE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        cfg.try_deserialize()
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.progress_tick_ms == 0 {
            return Err("playback.progress_tick_ms must be >= 1".to_string());
        }
        Ok(())
    }
}

/// The config file to try: `ENCORE_CONFIG_PATH` wins, otherwise
/// `$XDG_CONFIG_HOME/encore/config.toml` (`~/.config` when unset).
pub(super) fn config_file_path() -> Option<PathBuf> {
    env::var_os("ENCORE_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(xdg_config_path)
}

pub(super) fn xdg_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("encore").join("config.toml"))
}
