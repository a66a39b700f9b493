//! Session state and entity types
//!
//! Everything a running session owns lives in [`World`]; components receive it
//! explicitly instead of reaching for globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::SessionRng;
use super::timer::{TimerHandle, Timers};
use crate::consts::*;
use crate::settings::Settings;

/// Stable entity identifier. Never reused, not even across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Collision tag attached to every body the substrate knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Player,
    Hazard,
    Collectible,
    Floor,
    /// Left/right/top level borders (no reactions)
    Border,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Simulation running, snowflakes falling
    Active,
    /// Run over, high-score window open, simulation frozen
    Ended,
    /// End-of-run menu open, simulation frozen
    MenuOpen,
}

/// Which side of the level a hazard was dropped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    Left,
    Right,
}

/// Snowflake artwork variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnowflakeVariant {
    Star,
    Crystal,
    Fern,
}

impl SnowflakeVariant {
    pub const ALL: [SnowflakeVariant; 3] = [
        SnowflakeVariant::Star,
        SnowflakeVariant::Crystal,
        SnowflakeVariant::Fern,
    ];
}

/// Image each entity is drawn with; the front end resolves the asset name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Child,
    RugRack,
    Snowflake(SnowflakeVariant),
}

impl Sprite {
    pub fn asset_name(&self) -> &'static str {
        match self {
            Sprite::Child => "child",
            Sprite::RugRack => "rug_rack",
            Sprite::Snowflake(SnowflakeVariant::Star) => "snowflake2",
            Sprite::Snowflake(SnowflakeVariant::Crystal) => "snowflake3",
            Sprite::Snowflake(SnowflakeVariant::Fern) => "snowflake4",
        }
    }
}

/// Playable area, origin at the centre, y up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Level {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            left: -width / 2.0,
            right: width / 2.0,
            bottom: -height / 2.0,
            top: height / 2.0,
        }
    }

    /// Upper edge of the floor border
    pub fn floor_top(&self) -> f32 {
        self.bottom
    }
}

/// Border bodies created with the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundaries {
    pub floor: EntityId,
    pub left: EntityId,
    pub right: EntityId,
    pub top: EntityId,
}

/// The player's character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub sprite: Sprite,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            sprite: Sprite::Child,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    /// Standing on (or sunk into) the floor line
    pub fn on_floor(&self, floor_top: f32) -> bool {
        self.bottom() <= floor_top + 0.5
    }
}

/// A static rug rack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub band: Band,
    pub sprite: Sprite,
}

impl Hazard {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }
}

/// A falling snowflake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub variant: SnowflakeVariant,
}

impl Collectible {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }
}

/// Snowflakes caught this run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounter {
    value: u32,
}

impl ScoreCounter {
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    /// Only the world builder resets the counter
    pub(crate) fn reset(&mut self) {
        self.value = 0;
    }
}

/// Complete session context
#[derive(Debug)]
pub struct World {
    /// Seed the RNG stream started from
    pub seed: u64,
    pub(crate) rng: SessionRng,
    pub settings: Settings,
    pub phase: SessionPhase,
    pub level: Level,
    pub gravity: Vec2,
    pub boundaries: Boundaries,
    pub player: Player,
    /// Sorted by id for determinism
    pub hazards: Vec<Hazard>,
    /// Sorted by id for determinism
    pub collectibles: Vec<Collectible>,
    pub score: ScoreCounter,
    pub timers: Timers,
    pub spawn_timer: Option<TimerHandle>,
    pub correction_job: Option<TimerHandle>,
    /// Score captured when the run ended
    pub final_score: Option<u32>,
    /// Exit confirmation is on screen; simulation frozen until answered
    pub exit_prompt: bool,
    /// Quit was confirmed; the front end should shut down
    pub terminated: bool,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Number of completed world builds
    pub builds: u32,
    next_id: u32,
}

impl World {
    /// Create a world and build the first session
    pub fn new(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let level = Level::new(settings.level_width, settings.level_height);
        let placeholder = EntityId(0);
        let mut world = Self {
            seed,
            rng: SessionRng::new(seed),
            settings,
            phase: SessionPhase::Active,
            level,
            gravity: Vec2::ZERO,
            boundaries: Boundaries {
                floor: placeholder,
                left: placeholder,
                right: placeholder,
                top: placeholder,
            },
            player: Player::new(placeholder, Vec2::ZERO),
            hazards: Vec::new(),
            collectibles: Vec::new(),
            score: ScoreCounter::default(),
            timers: Timers::new(),
            spawn_timer: None,
            correction_job: None,
            final_score: None,
            exit_prompt: false,
            terminated: false,
            time_ticks: 0,
            builds: 0,
            next_id: 1,
        };

        super::build::build(&mut world);

        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Tag of a live entity, None once it is gone
    pub fn tag_of(&self, id: EntityId) -> Option<Tag> {
        if id == self.player.id {
            return Some(Tag::Player);
        }
        if id == self.boundaries.floor {
            return Some(Tag::Floor);
        }
        if id == self.boundaries.left || id == self.boundaries.right || id == self.boundaries.top {
            return Some(Tag::Border);
        }
        if self.hazards.iter().any(|h| h.id == id) {
            return Some(Tag::Hazard);
        }
        if self.collectible(id).is_some() {
            return Some(Tag::Collectible);
        }
        None
    }

    pub fn collectible(&self, id: EntityId) -> Option<&Collectible> {
        self.collectibles
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| &self.collectibles[i])
    }

    /// Remove a snowflake; a second call for the same id is a no-op
    pub fn remove_collectible(&mut self, id: EntityId) -> Option<Collectible> {
        let idx = self.collectibles.binary_search_by_key(&id, |c| c.id).ok()?;
        Some(self.collectibles.remove(idx))
    }

    /// Simulation only advances while the run is live and no exit prompt is up
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Active && !self.exit_prompt && !self.terminated
    }
}
