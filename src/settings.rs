//! User settings
//!
//! Read once at startup from a JSON file. Every field is optional; a missing
//! or unreadable file falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::sim::EfLevel;

/// Environment variable naming an explicit settings file
pub const SETTINGS_ENV: &str = "TORNADO_SETTINGS";
/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "tornado.json";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Resolution of the vortex body layer relative to the canvas.
    /// Smaller layers upscale into a softer silhouette.
    pub fn body_layer_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.5,
            QualityPreset::High => 1.0,
        }
    }
}

/// Startup settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// EF level shown at startup
    pub start_level: EfLevel,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
    /// Explicit HUD font file
    pub font_path: Option<PathBuf>,
    /// Draw the info panel
    pub show_hud: bool,
    /// Frame cap
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            start_level: EfLevel::Ef2,
            seed: None,
            font_path: None,
            show_hud: true,
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Frame cap clamped to a sane range
    pub fn effective_fps(&self) -> u32 {
        self.target_fps.clamp(1, 240)
    }

    /// Parse settings JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Settings file location: `$TORNADO_SETTINGS`, else `./tornado.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Load from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        let quality: QualityPreset = serde_json::from_str("\"low\"").expect("lowercase name");
        assert_eq!(quality, QualityPreset::Low);
        assert!(serde_json::from_str::<QualityPreset>("\"ultra\"").is_err());
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_body_scale_increases_with_quality() {
        assert!(QualityPreset::Low.body_layer_scale() < QualityPreset::Medium.body_layer_scale());
        assert_eq!(QualityPreset::High.body_layer_scale(), 1.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "quality": "high", "start_level": "EF4" }"#)
            .expect("valid settings");
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.start_level, EfLevel::Ef4);
        assert!(settings.show_hud);
        assert_eq!(settings.target_fps, TARGET_FPS);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_round_trip_with_seed() {
        let settings = Settings {
            seed: Some(42),
            font_path: Some(PathBuf::from("/tmp/font.ttf")),
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = std::env::temp_dir().join(format!("tornado-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").expect("write temp file");
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/tornado.json");
        assert_eq!(Settings::load_from(path), Settings::default());
    }

    #[test]
    fn test_fps_clamp() {
        let settings = Settings {
            target_fps: 0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_fps(), 1);
        let settings = Settings {
            target_fps: 1000,
            ..Settings::default()
        };
        assert_eq!(settings.effective_fps(), 240);
    }
}
