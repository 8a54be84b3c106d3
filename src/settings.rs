//! Player preferences
//!
//! Persisted separately from the leaderboard in the same key/value store.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0), scales every cue's gain
    pub master_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === Visual Effects ===
    /// Particle bursts on brick break
    pub particles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
            particles: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Effective cue volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        log::info!("Sound {}", if self.muted { "muted" } else { "unmuted" });
    }

    /// Load settings; anything missing or unreadable falls back to defaults
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match persistence::load_json(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings {
            master_volume: 1.5,
            ..Default::default()
        };
        assert_eq!(settings.effective_volume(), 1.0);
        settings.toggle_mute();
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_save_and_reload() {
        let mut store = MemoryStorage::new();
        let settings = Settings {
            master_volume: 0.4,
            muted: true,
            particles: false,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let mut store = MemoryStorage::new();
        store.set(Settings::STORAGE_KEY, r#"{"muted":true}"#).unwrap();
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert!(settings.particles);
        assert_eq!(settings.master_volume, 1.0);
    }
}
