//! HUD score label
//!
//! Read-only view of the score counter, pinned to the top-left corner.

use glam::Vec2;

use crate::sim::{Level, ScoreCounter};

/// Numeric label bound to the score counter
#[derive(Debug, Clone)]
pub struct ScoreLabel {
    /// Centre of the label in level coordinates
    pub pos: Vec2,
    pub width: f32,
    text: String,
    shown: Option<u32>,
}

impl ScoreLabel {
    /// Place the label in the top-left corner of the level
    pub fn new(level: &Level) -> Self {
        Self {
            pos: Vec2::new(level.left + 60.0, level.top - 20.0),
            width: 100.0,
            text: String::new(),
            shown: None,
        }
    }

    /// Pull the counter value; returns true when the text changed
    pub fn refresh(&mut self, counter: &ScoreCounter) -> bool {
        let value = counter.value();
        if self.shown == Some(value) {
            return false;
        }
        self.shown = Some(value);
        self.text = value.to_string();
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
