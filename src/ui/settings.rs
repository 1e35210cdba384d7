/// User settings for the front end
///
/// Remembers the last resize inputs and denoise strength between runs.
/// Stored as JSON next to the other per-user config; the editing core
/// never sees this file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use image_processor::state::session::{MAX_DENOISE_STRENGTH, MIN_DENOISE_STRENGTH};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Values of the resize and denoise controls
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Resize width input, kept as typed
    pub width: String,
    /// Resize height input, kept as typed
    pub height: String,
    /// Denoise slider position (1 to 7)
    pub noise_strength: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: "800".to_string(),
            height: "600".to_string(),
            noise_strength: 3,
        }
    }
}

impl Settings {
    /// Convert to pretty JSON for the settings file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON, pulling the slider back into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.noise_strength = settings
            .noise_strength
            .clamp(MIN_DENOISE_STRENGTH as u8, MAX_DENOISE_STRENGTH as u8);
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json).map_err(SettingsError::from))
        {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
