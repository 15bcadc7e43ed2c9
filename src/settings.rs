//! User profile and global audio settings
//!
//! The gate consults these read-only; storing and editing them belongs to
//! the host. Both documents are serde types loadable from TOML or RON
//! through [`SettingsFile`].

use crate::error::AudioError;
use serde::{Deserialize, Serialize};

/// Divisor converting user-facing integer volumes to the device's
/// normalized float range.
pub const SOUND_DELTA: f32 = 250.0;

/// Upper bound (exclusive) on valid music asset indices.
pub const MAX_MUSIC_DATA_INDEX_COUNT: u32 = 150;

/// Per-character audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Whether one-shot sound effects play at all
    pub enable_sound: bool,

    /// Whether background music plays at all
    pub enable_music: bool,

    /// Sound effect volume on the user-facing integer scale
    pub sound_volume: u16,

    /// Music volume on the user-facing integer scale
    pub music_volume: u16,

    /// Keep playing when the client window loses focus
    pub reproduce_sounds_in_background: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            enable_sound: true,
            enable_music: true,
            sound_volume: 100,
            music_volume: 100,
            reproduce_sounds_in_background: false,
        }
    }
}

/// Client-wide settings that apply before any profile is loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Whether music plays on the login scene
    pub login_music: bool,

    /// Login music volume on the user-facing integer scale
    pub login_music_volume: u16,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            login_music: true,
            login_music_volume: 70,
        }
    }
}

/// On-disk bundle of profile and global audio settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// The active character's preferences
    pub profile: Profile,

    /// Client-wide settings
    pub globals: GlobalSettings,
}

/// Settings file loading and saving, dispatching on file extension
pub trait SettingsFile: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load settings from a `.toml` or `.ron` file
    fn load_from_file(path: &str) -> Result<Self, AudioError> {
        let contents = std::fs::read_to_string(path)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| AudioError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| AudioError::Parse(e.to_string()))
        } else {
            Err(AudioError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save settings to a `.toml` or `.ron` file
    fn save_to_file(&self, path: &str) -> Result<(), AudioError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| AudioError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| AudioError::Serialize(e.to_string()))?
        } else {
            return Err(AudioError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl SettingsFile for AudioSettings {}
impl SettingsFile for Profile {}
impl SettingsFile for GlobalSettings {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let profile = Profile::default();
        assert!(profile.enable_sound);
        assert!(profile.enable_music);
        assert_eq!(profile.sound_volume, 100);
        assert_eq!(profile.music_volume, 100);
        assert!(!profile.reproduce_sounds_in_background);
    }

    #[test]
    fn test_global_defaults() {
        let globals = GlobalSettings::default();
        assert!(globals.login_music);
        assert_eq!(globals.login_music_volume, 70);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: AudioSettings =
            toml::from_str("[profile]\nsound_volume = 30\n").expect("valid toml");
        assert_eq!(settings.profile.sound_volume, 30);
        assert_eq!(settings.profile.music_volume, 100);
        assert!(settings.globals.login_music);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("audio.toml");
        let path = path.to_str().expect("utf8 path");

        let mut settings = AudioSettings::default();
        settings.profile.music_volume = 42;
        settings.globals.login_music = false;
        settings.save_to_file(path).expect("save");

        let loaded = AudioSettings::load_from_file(path).expect("load");
        assert_eq!(loaded.profile.music_volume, 42);
        assert!(!loaded.globals.login_music);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("audio.ron");
        let path = path.to_str().expect("utf8 path");

        let mut settings = AudioSettings::default();
        settings.profile.sound_volume = 250;
        settings.save_to_file(path).expect("save");

        let loaded = AudioSettings::load_from_file(path).expect("load");
        assert_eq!(loaded.profile.sound_volume, 250);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("audio.json");
        std::fs::write(&path, "{}").expect("write");

        let result = AudioSettings::load_from_file(path.to_str().expect("utf8 path"));
        assert!(matches!(result, Err(AudioError::UnsupportedFormat(_))));

        let result = AudioSettings::default().save_to_file("audio.json");
        assert!(matches!(result, Err(AudioError::UnsupportedFormat(_))));
    }
}
