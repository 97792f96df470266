//! Sound preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

/// The two independently adjustable audio channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChannel {
    Sfx,
    Music,
}

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when the tab loses visibility
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_volume: 1.0,
            music_volume: 0.5,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dazed_bird_settings";

    pub fn volume(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Sfx => self.sfx_volume,
            VolumeChannel::Music => self.music_volume,
        }
    }

    /// Set a channel volume, clamped to the unit range
    pub fn set_volume(&mut self, channel: VolumeChannel, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        match channel {
            VolumeChannel::Sfx => self.sfx_volume = volume,
            VolumeChannel::Music => self.music_volume = volume,
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_volume_clamps() {
        let mut settings = Settings::default();
        settings.set_volume(VolumeChannel::Sfx, 1.5);
        assert_eq!(settings.volume(VolumeChannel::Sfx), 1.0);
        settings.set_volume(VolumeChannel::Music, -0.2);
        assert_eq!(settings.volume(VolumeChannel::Music), 0.0);
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let settings = Settings {
            sfx_volume: 0.25,
            music_volume: 0.75,
            mute_on_blur: false,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sfx_volume, 0.25);
        assert_eq!(back.music_volume, 0.75);
        assert!(!back.mute_on_blur);
    }
}
