//! Game settings and preferences
//!
//! Stored as JSON next to the game; missing files fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FRAME_RATE, PLAYFIELD_HEIGHT};

/// Default level RNG seed
pub const DEFAULT_SEED: u64 = 0x5EED_2024;

/// Errors from reading or writing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame rate must be positive")]
    ZeroFrameRate,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play sound cues at all
    pub sound_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Simulation ===
    /// Seed for level layout randomness
    pub seed: u64,
    /// Simulated frames per second, drives level timers
    pub frame_rate: u32,
    /// Falling below this y kills the player
    pub playfield_height: f32,

    // === Visual Effects ===
    /// Particle bursts (jump dust, death, completion)
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            sfx_volume: 1.0,

            seed: DEFAULT_SEED,
            frame_rate: FRAME_RATE,
            playfield_height: PLAYFIELD_HEIGHT,

            particles: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from disk, falling back to defaults when the file is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_rate == 0 {
            return Err(SettingsError::ZeroFrameRate);
        }
        Ok(())
    }
}
