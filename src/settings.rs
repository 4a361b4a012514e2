//! Player preferences
//!
//! Persisted separately from the high score, as JSON.

use serde::{Deserialize, Serialize};

use crate::persistence;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show the (fake) progress bar
    pub show_progress: bool,
    /// Show sarcastic flavor messages
    pub show_messages: bool,

    // === Accessibility ===
    /// Reduced motion (ground stripes stop scrolling)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            show_progress: true,
            show_messages: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sarcastic_runner_settings";

    /// Volume actually applied to sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse stored JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        match persistence::load_string(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Flip mute and persist the choice. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.save();
        log::info!("Muted: {}", self.muted);
        self.muted
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            persistence::save_string(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_silences_sfx() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert!((Settings::default().effective_sfx_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_garbage_json_falls_back_to_defaults() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"muted":true}"#);
        assert!(settings.muted);
        assert!(settings.show_progress);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_toggle_mute_persists() {
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert!(Settings::load().muted);

        assert!(!settings.toggle_mute());
        assert!(!Settings::load().muted);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load() {
        let settings = Settings {
            reduced_motion: true,
            master_volume: 0.3,
            ..Default::default()
        };
        settings.save();
        assert_eq!(Settings::load(), settings);
    }
}
