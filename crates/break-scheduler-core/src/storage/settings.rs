//! TOML-based host settings.
//!
//! These tune the embedding host, not the break cycle itself:
//! - Tick source period
//! - Whether a stored running countdown resumes on restart
//!
//! Settings are stored at `~/.config/break-scheduler/settings.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Host settings.
///
/// Serialized to/from TOML at `~/.config/break-scheduler/settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Milliseconds between ticks; one tick is one scheduler second.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Keep a stored `is_running` flag when the host restarts.
    #[serde(default = "default_true")]
    pub resume_running: bool,
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            resume_running: true,
        }
    }
}

impl Settings {
    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("settings.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be parsed,
    /// or if the default settings cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let settings = Self::default();
                settings.save_to(path)?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
        assert_eq!(parsed.tick_interval_ms, 1000);
        assert!(parsed.resume_running);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Settings = toml::from_str("resume_running = false").unwrap();
        assert_eq!(parsed.tick_interval_ms, 1000);
        assert!(!parsed.resume_running);
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "tick_interval_ms = \"soon\"").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }
}
