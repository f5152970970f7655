//! Game settings and tuning
//!
//! Persisted as JSON next to the map file. Missing fields fall back to the
//! defaults so older files keep working.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::Rules;

/// One kind of collectible: the image to draw and its reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAssetConfig {
    pub image: String,
    pub reward: i32,
}

impl ItemAssetConfig {
    fn new(image: &str, reward: i32) -> Self {
        Self {
            image: image.to_string(),
            reward,
        }
    }
}

/// Authoring defaults written into new maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub pixel_per_meter: f64,
    pub gravity: f64,
    pub item_drift_speed: f64,
    /// Snapshots kept for undo (at least 1)
    pub history_capacity: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            pixel_per_meter: EDITOR_PIXEL_PER_METER,
            gravity: EDITOR_GRAVITY,
            item_drift_speed: EDITOR_ITEM_DRIFT_SPEED,
            history_capacity: EDITOR_HISTORY_CAPACITY,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Board tilt speed while a tilt key is held (rad/s)
    pub tilt_speed: f64,

    // === Rules ===
    /// Frozen countdown before each attempt (seconds)
    pub countdown_seconds: f64,
    pub initial_life: u32,
    pub initial_score: i32,

    // === Display ===
    /// Square canvas size in pixels
    pub canvas_size: f64,

    // === Items ===
    /// Seed for assigning images and rewards to items
    pub rng_seed: u64,
    pub item_catalog: Vec<ItemAssetConfig>,

    pub editor: EditorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tilt_speed: TILT_SPEED,

            countdown_seconds: COUNTDOWN_SECONDS,
            initial_life: INITIAL_LIFE,
            initial_score: INITIAL_SCORE,

            canvas_size: CANVAS_SIZE,

            rng_seed: 0x5150_2017,
            item_catalog: vec![
                ItemAssetConfig::new("sotsuken.png", 2),
                ItemAssetConfig::new("sannsuu.png", 2),
                ItemAssetConfig::new("gunma.png", 0),
                ItemAssetConfig::new("nihonnshi.png", 1),
            ],

            editor: EditorSettings::default(),
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const DEFAULT_PATH: &'static str = "tilt_maze_settings.json";

    /// Life/score rules for a session
    pub fn rules(&self) -> Rules {
        Rules {
            initial_life: self.initial_life,
            initial_score: self.initial_score,
        }
    }

    /// Parse settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// malformed
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rules() {
        let settings = Settings::default();
        let rules = settings.rules();
        assert_eq!(rules.initial_life, 4);
        assert_eq!(rules.initial_score, 3);
        assert_eq!(settings.tilt_speed, 0.5);
        assert_eq!(settings.countdown_seconds, 2.0);
        assert_eq!(settings.editor.pixel_per_meter, 50.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "tilt_speed": 1.25, "editor": { "gravity": 5.0 } }"#)
            .unwrap();
        assert_eq!(settings.tilt_speed, 1.25);
        assert_eq!(settings.editor.gravity, 5.0);
        assert_eq!(settings.editor.pixel_per_meter, 50.0);
        assert_eq!(settings.item_catalog.len(), 4);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("tilt_maze_no_such_settings.json");
        assert_eq!(Settings::load_from(path), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "tilt_maze_settings_{}.json",
            std::process::id()
        ));
        let mut settings = Settings::default();
        settings.initial_life = 7;
        settings.save_to(&path).unwrap();
        let back = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(back, settings);
    }
}
