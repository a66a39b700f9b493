//! Snowfall - A single-screen snowflake catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic session orchestration (world build, spawning, collisions, session flow)
//! - `controls`: Key bindings and held-key input snapshots
//! - `hud`: Score label bound to the score counter
//! - `highscores`: Top-10 leaderboard and the high-score service seam
//! - `settings`: Data-driven game tuning

pub mod controls;
pub mod highscores;
pub mod hud;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreService, HighScores};
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (100 Hz, same rate as the floor correction job)
    pub const SIM_DT: f32 = 1.0 / 100.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level defaults (origin at the level centre, y grows upward)
    pub const LEVEL_WIDTH: f32 = 1024.0;
    pub const LEVEL_HEIGHT: f32 = 768.0;
    pub const GRAVITY: f32 = -100.0;

    /// Player size
    pub const PLAYER_WIDTH: f32 = 2.0 * 50.0;
    pub const PLAYER_HEIGHT: f32 = 2.0 * 80.0;
    /// Walk and jump speed
    pub const MOVE_SPEED: f32 = 200.0;

    /// Hazard (rug rack) size
    pub const HAZARD_WIDTH: f32 = 2.0 * 50.0;
    pub const HAZARD_HEIGHT: f32 = 2.0 * 100.0;
    /// Hazard centre height above the floor line
    pub const HAZARD_FLOOR_OFFSET: f32 = 100.0;
    /// Width of each side band hazards are dropped into
    pub const HAZARD_BAND_WIDTH: f32 = 400.0;
    pub const HAZARD_COUNT: u32 = 2;

    /// Snowflake diameter
    pub const SNOWFLAKE_SIZE: f32 = 2.0 * 10.0;
    /// Seconds between snowflake spawns
    pub const SPAWN_INTERVAL: f32 = 0.5;

    /// Floor correction job
    pub const CORRECTION_INTERVAL: f32 = 0.01;
    pub const CORRECTION_STEP: f32 = 2.0;
}

/// Axis-aligned rectangle overlap test on centre/size pairs
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let half = (a_size + b_size) * 0.5;
    let d = (a_pos - b_pos).abs();
    d.x < half.x && d.y < half.y
}
