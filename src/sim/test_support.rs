//! Scripted collaborators for orchestration tests

use std::collections::VecDeque;

use super::collision::Contact;
use super::physics::PhysicsSubstrate;
use super::state::World;
use crate::highscores::HighScoreService;

/// Substrate that moves nothing and replays queued contact lists, one per tick
#[derive(Debug, Default)]
pub struct ScriptedPhysics {
    frames: VecDeque<Vec<Contact>>,
    pub integrations: u32,
}

impl ScriptedPhysics {
    /// Queue the contacts reported on the next unscripted tick
    pub fn push(&mut self, contacts: Vec<Contact>) {
        self.frames.push_back(contacts);
    }
}

impl PhysicsSubstrate for ScriptedPhysics {
    fn integrate(&mut self, _world: &mut World, _dt: f32) {
        self.integrations += 1;
    }

    fn contacts(&mut self, _world: &World) -> Vec<Contact> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// High-score service that remembers what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingScores {
    pub entered: Vec<u32>,
    pub shown: u32,
}

impl HighScoreService for RecordingScores {
    fn enter_and_show(&mut self, score: u32) {
        self.entered.push(score);
    }

    fn show(&mut self) {
        self.shown += 1;
    }
}
