//! Game settings and preferences
//!
//! Loaded from a JSON file next to the save data. Any field missing from the
//! file takes its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Default location of the progress save
pub const DEFAULT_SAVE_PATH: &str = "data/binsort_save.json";
/// Default location of the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "data/binsort_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where unlocked-level progress is stored
    pub save_path: PathBuf,

    // === Gameplay ===
    /// Minimum time between bin swaps
    pub swap_cooldown_ms: u64,
    /// Bin movement per frame (pixels)
    pub player_speed: f32,
    pub starting_health: i32,
    /// Levels up to this number open with a tutorial card
    pub intro_max_level: u32,
    /// Let the computer play
    pub autopilot: bool,
    /// Fixed RNG seed; None picks one from the clock
    pub seed: Option<u64>,
    /// Pace frames against the wall clock instead of simulated time
    pub realtime: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),

            swap_cooldown_ms: SWAP_COOLDOWN_MS,
            player_speed: PLAYER_SPEED,
            starting_health: STARTING_HEALTH,
            intro_max_level: INTRO_MAX_LEVEL,
            autopilot: false,
            seed: None,
            realtime: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as JSON. Best effort: failures are logged.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let result = serde_json::to_string_pretty(self)
            .map_err(std::io::Error::other)
            .and_then(|json| {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, json)
            });
        match result {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(e) => {
                log::warn!("Failed to save settings to {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Clamp values a hand-edited file could break
    fn sanitized(mut self) -> Self {
        self.player_speed = self.player_speed.max(0.0);
        self.starting_health = self.starting_health.max(1);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("bin-sort-settings-{}-{}", std::process::id(), name))
            .join("settings.json")
    }

    #[test]
    fn defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.swap_cooldown_ms, 500);
        assert_eq!(s.starting_health, 3);
        assert_eq!(s.intro_max_level, 2);
        assert_eq!(s.save_path, PathBuf::from("data/binsort_save.json"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"autopilot": true, "seed": 7}"#).unwrap();
        assert!(s.autopilot);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.player_speed, PLAYER_SPEED);
    }

    #[test]
    fn missing_or_corrupt_file_gives_defaults() {
        let path = temp_path("corrupt");
        assert_eq!(Settings::load(&path), Settings::default());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            muted: true,
            seed: Some(99),
            ..Default::default()
        };
        assert!(settings.save(&path));
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn hand_edited_values_are_clamped() {
        let s: Settings =
            serde_json::from_str(r#"{"starting_health": -4, "master_volume": 3.0}"#).unwrap();
        let s = s.sanitized();
        assert_eq!(s.starting_health, 1);
        assert_eq!(s.master_volume, 1.0);
    }
}
