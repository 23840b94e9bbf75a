//! Player preferences
//!
//! Adapter-facing only: nothing here reaches the simulation. The headless
//! binary builds these from its command line.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} volume must be between 0.0 and 1.0 (got {value})")]
    Volume { name: &'static str, value: f32 },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Silence every cue and the music
    pub mute: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Display ===
    pub fullscreen: bool,
    /// Particle effects (bursts, sparks, spore clouds)
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mute: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.4,
            fullscreen: false,
            particles: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("master", self.master_volume),
            ("sfx", self.sfx_volume),
            ("music", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::Volume { name, value });
            }
        }
        Ok(())
    }

    /// Effective sound effect gain (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.mute {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music gain (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.mute {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences_everything() {
        let settings = Settings {
            mute: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);

        let settings = Settings::default();
        assert!((settings.effective_music_volume() - 0.32).abs() < 1e-6);
    }

    #[test]
    fn test_volume_range() {
        assert!(Settings::default().validate().is_ok());
        let settings = Settings {
            sfx_volume: 1.5,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Volume {
                name: "sfx",
                value: 1.5
            })
        );
        let settings = Settings {
            master_volume: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "mute": true }"#).expect("parse settings");
        assert!(settings.mute);
        assert_eq!(settings.master_volume, 0.8);
    }
}
