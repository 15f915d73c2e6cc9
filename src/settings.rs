//! Arcade settings
//!
//! Read from a JSON file at startup; every field is optional and falls back
//! to its default.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::state::GameKind;

/// Environment variable naming the settings file when no CLI argument is given
pub const SETTINGS_ENV: &str = "GESTURE_ARCADE_SETTINGS";
/// Overrides `start_game` (`shooter`, `quiz`, `pong`)
pub const GAME_ENV: &str = "GESTURE_ARCADE_GAME";
/// Overrides `quality` (`low`, `medium`, `high`)
pub const QUALITY_ENV: &str = "GESTURE_ARCADE_QUALITY";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
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

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live feedback effects for this preset
    pub fn max_effects(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Arcade settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Effect budget preset
    pub quality: QualityPreset,
    /// Sparks, rings and confetti
    pub effects: bool,
    /// Frame-rate cap; each game's default when unset
    pub frame_rate: Option<u32>,
    /// Run seed; derived from the clock when unset
    pub seed: Option<u64>,
    pub start_game: GameKind,
    /// Directory sprites and backgrounds are looked up in
    pub asset_dir: PathBuf,
    /// Tracker trace to replay instead of a live camera
    pub trace: Option<PathBuf>,
    /// Log every snapshot as JSON at debug level
    pub log_snapshots: bool,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            effects: true,
            frame_rate: None,
            seed: None,
            start_game: GameKind::Shooter,
            asset_dir: PathBuf::from("assets"),
            trace: None,
            log_snapshots: false,
            max_ticks: None,
        }
    }
}

impl Settings {
    /// Effective effect cap (0 when effects are off)
    pub fn max_effects(&self) -> usize {
        if !self.effects {
            0
        } else {
            self.quality.max_effects()
        }
    }

    /// Frame-rate cap for `kind`, honouring an explicit override
    pub fn frame_rate_for(&self, kind: GameKind) -> u32 {
        self.frame_rate.unwrap_or_else(|| kind.frame_rate())
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to parse settings {}", path.display()))
    }

    /// Apply `GAME_ENV` / `QUALITY_ENV` style overrides; unknown values are ignored
    pub fn apply_overrides(&mut self, game: Option<&str>, quality: Option<&str>) {
        if let Some(value) = game {
            match GameKind::from_str(value) {
                Some(kind) => self.start_game = kind,
                None => log::warn!("Unknown game '{}', starting {}", value, self.start_game.as_str()),
            }
        }
        if let Some(value) = quality {
            match QualityPreset::from_str(value) {
                Some(preset) => self.quality = preset,
                None => log::warn!("Unknown quality '{}', keeping {}", value, self.quality.as_str()),
            }
        }
    }

    /// Settings from the first CLI argument or `SETTINGS_ENV`, then env overrides
    ///
    /// A missing or broken file is logged and replaced with defaults.
    pub fn from_args_or_env(arg: Option<String>) -> Self {
        let mut settings = match arg.or_else(|| std::env::var(SETTINGS_ENV).ok()) {
            None => {
                log::info!("Using default settings");
                Self::default()
            }
            Some(path) => match Self::load(&path) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("{:#}; using default settings", e);
                    Self::default()
                }
            },
        };
        settings.apply_overrides(
            std::env::var(GAME_ENV).ok().as_deref(),
            std::env::var(QUALITY_ENV).ok().as_deref(),
        );
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"quality": "High", "start_game": "Pong"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.start_game, GameKind::Pong);
        assert!(settings.effects);
        assert_eq!(settings.asset_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_effect_cap() {
        let mut settings = Settings {
            quality: QualityPreset::Low,
            ..Default::default()
        };
        assert_eq!(settings.max_effects(), 100);
        settings.effects = false;
        assert_eq!(settings.max_effects(), 0);
    }

    #[test]
    fn test_frame_rate_override() {
        let mut settings = Settings::default();
        assert_eq!(settings.frame_rate_for(GameKind::Quiz), 30);
        settings.frame_rate = Some(45);
        assert_eq!(settings.frame_rate_for(GameKind::Shooter), 45);
    }

    #[test]
    fn test_bad_file_falls_back() {
        let settings = Settings::from_args_or_env(Some("/no/such/settings.json".to_string()));
        assert_eq!(settings.asset_dir, Settings::default().asset_dir);
        assert_eq!(settings.trace, None);
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_overrides_pick_game_and_quality() {
        let mut settings = Settings::default();
        settings.apply_overrides(Some("pingpong"), Some("HIGH"));
        assert_eq!(settings.start_game, GameKind::Pong);
        assert_eq!(settings.quality, QualityPreset::High);

        settings.apply_overrides(Some("golf"), Some("ultra"));
        assert_eq!(settings.start_game, GameKind::Pong);
        assert_eq!(settings.quality, QualityPreset::High);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }
}
