//! Game settings and tuning
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Largest accepted level side
const MAX_LEVEL_SIZE: f32 = 100_000.0;
/// Most rug racks a build will place
const MAX_HAZARD_COUNT: u32 = 64;
/// Longest accepted timer period, in seconds
const MAX_INTERVAL: f32 = 3600.0;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Number of rug racks placed at build time
    pub fn hazard_count(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => HAZARD_COUNT,
            Difficulty::Hard => 4,
        }
    }

    /// Seconds between snowflakes
    pub fn spawn_interval(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.4,
            Difficulty::Normal => SPAWN_INTERVAL,
            Difficulty::Hard => 0.75,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Level ===
    pub level_width: f32,
    pub level_height: f32,
    /// Vertical gravity (negative = down)
    pub gravity: f32,

    // === Player ===
    /// Walk speed and jump impulse
    pub move_speed: f32,

    // === Spawning ===
    pub hazard_count: u32,
    pub hazard_band_width: f32,
    pub spawn_interval: f32,

    // === Floor correction job ===
    pub correction_interval: f32,
    pub correction_step: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            level_width: LEVEL_WIDTH,
            level_height: LEVEL_HEIGHT,
            gravity: GRAVITY,

            move_speed: MOVE_SPEED,

            hazard_count: HAZARD_COUNT,
            hazard_band_width: HAZARD_BAND_WIDTH,
            spawn_interval: SPAWN_INTERVAL,

            correction_interval: CORRECTION_INTERVAL,
            correction_step: CORRECTION_STEP,
        }
    }
}

impl Settings {
    /// Apply a difficulty preset (updates preset-dependent settings)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.hazard_count = preset.hazard_count();
        self.spawn_interval = preset.spawn_interval();
    }

    /// Clamp values the session cannot work with
    pub fn sanitized(mut self) -> Self {
        let min_level = PLAYER_WIDTH.max(PLAYER_HEIGHT);
        self.level_width = clamp_or(self.level_width, min_level, MAX_LEVEL_SIZE, LEVEL_WIDTH);
        self.level_height = clamp_or(self.level_height, min_level, MAX_LEVEL_SIZE, LEVEL_HEIGHT);
        self.hazard_band_width =
            clamp_or(self.hazard_band_width, 0.0, MAX_LEVEL_SIZE, HAZARD_BAND_WIDTH);
        self.hazard_count = self.hazard_count.min(MAX_HAZARD_COUNT);

        self.gravity = finite_or(self.gravity, GRAVITY);
        self.move_speed = clamp_or(self.move_speed, 0.0, MAX_LEVEL_SIZE, MOVE_SPEED);
        self.correction_step = clamp_or(self.correction_step, 0.0, MAX_LEVEL_SIZE, CORRECTION_STEP);

        // Zero or negative periods fall back rather than clamp
        if !(self.spawn_interval > 0.0) {
            self.spawn_interval = SPAWN_INTERVAL;
        }
        if !(self.correction_interval > 0.0) {
            self.correction_interval = CORRECTION_INTERVAL;
        }
        self.spawn_interval = clamp_or(self.spawn_interval, 0.0, MAX_INTERVAL, SPAWN_INTERVAL);
        self.correction_interval =
            clamp_or(self.correction_interval, 0.0, MAX_INTERVAL, CORRECTION_INTERVAL);
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Clamp into `[lo, hi]`; NaN and infinities take `fallback`
fn clamp_or(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    finite_or(value, fallback).clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let settings = Settings::default();
        assert_eq!(settings.hazard_count, 2);
        assert_eq!(settings.spawn_interval, 0.5);
        assert_eq!(settings.gravity, -100.0);
    }

    #[test]
    fn test_difficulty_round_trip_names() {
        for preset in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_preset_overrides_spawning() {
        let mut hard = Settings::default();
        hard.apply_preset(Difficulty::Hard);
        assert_eq!(hard.hazard_count, 4);
        assert!(hard.spawn_interval > Settings::default().spawn_interval);
    }

    #[test]
    fn test_sanitized_rejects_zero_intervals() {
        let settings = Settings {
            spawn_interval: 0.0,
            correction_interval: -1.0,
            level_width: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.spawn_interval, SPAWN_INTERVAL);
        assert_eq!(settings.correction_interval, CORRECTION_INTERVAL);
        assert!(settings.level_width >= PLAYER_WIDTH);
    }

    #[test]
    fn test_sanitized_replaces_non_finite_values() {
        let settings = Settings {
            level_height: f32::NAN,
            gravity: f32::NEG_INFINITY,
            move_speed: f32::INFINITY,
            spawn_interval: f32::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.level_height, LEVEL_HEIGHT);
        assert_eq!(settings.gravity, GRAVITY);
        assert_eq!(settings.move_speed, MOVE_SPEED);
        assert_eq!(settings.spawn_interval, SPAWN_INTERVAL);
    }

    #[test]
    fn test_overflowing_json_level_is_playable() {
        // 1e39 overflows f32 to infinity when parsed
        let settings: Settings =
            serde_json::from_str(r#"{ "level_width": 1e39, "hazard_count": 4000000000 }"#).unwrap();
        let settings = settings.sanitized();
        assert!(settings.level_width.is_finite());
        assert_eq!(settings.hazard_count, MAX_HAZARD_COUNT);

        let mut world = crate::sim::World::new(3, settings);
        assert_eq!(world.hazards.len(), MAX_HAZARD_COUNT as usize);
        let flake = crate::sim::spawn::spawn_collectible(&mut world);
        let x = world.collectible(flake).map(|c| c.pos.x).unwrap();
        assert!(x.is_finite());
        assert!(x >= world.level.left && x <= world.level.right);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "hazard_count": 6 }"#).unwrap();
        assert_eq!(settings.hazard_count, 6);
        assert_eq!(settings.level_width, LEVEL_WIDTH);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/snowfall/settings.json"));
        assert_eq!(settings, Settings::default());
    }
}
