//! Runtime settings
//!
//! Read from a JSON file at startup. Missing fields take their defaults, and
//! a missing or broken file falls back to defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PLAYER_MAX_LIVES;

/// Settings load failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
    /// Try to open an audio output at all
    pub audio_enabled: bool,

    // === Run ===
    /// Length of the headless demo run, in ticks
    pub demo_ticks: u64,
    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            master_volume: 0.7,
            muted: false,
            audio_enabled: true,
            demo_ticks: 60 * 60,
            starting_lives: PLAYER_MAX_LIVES,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.starting_lives = settings.starting_lives.max(1);
        Ok(settings)
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "seed": 42, "muted": true }"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert!(s.muted);
        assert_eq!(s.starting_lives, PLAYER_MAX_LIVES);
        assert!(s.audio_enabled);
    }

    #[test]
    fn test_values_are_sanitized() {
        let s = Settings::from_json(r#"{ "master_volume": 4.0, "starting_lives": 0 }"#).unwrap();
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.starting_lives, 1);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = "definitely/not/here/settings.json";
        assert!(matches!(Settings::try_load(path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load(path), Settings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            seed: Some(7),
            demo_ticks: 100,
            ..Settings::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
