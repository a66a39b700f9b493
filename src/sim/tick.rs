//! Fixed timestep simulation tick
//!
//! One tick, in order: held-key movement, timer callbacks (snowflake spawn,
//! floor correction), physics integration, collision dispatch, and finally any
//! session transition those collisions asked for.

use super::collision::dispatch_contacts;
use super::physics::PhysicsSubstrate;
use super::player::{apply_input, run_correction_job};
use super::session::{end_session, request_exit};
use super::spawn::spawn_collectible;
use super::state::{Band, World};
use super::timer::TimerKind;
use crate::highscores::HighScoreService;

/// Keep this far from a rug rack when steering in idle mode
const IDLE_MARGIN: f32 = 8.0;
/// Close enough to the target column to stop walking
const IDLE_DEADZONE: f32 = 4.0;

/// Input snapshot for a single tick (movement keys are "currently held")
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub jump: bool,
    pub walk_right: bool,
    pub walk_left: bool,
    /// Exit gesture pressed this tick (escape / platform back)
    pub exit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
pub fn tick<P, S>(world: &mut World, input: &TickInput, dt: f32, physics: &mut P, scores: &mut S)
where
    P: PhysicsSubstrate + ?Sized,
    S: HighScoreService + ?Sized,
{
    if input.exit {
        request_exit(world);
    }

    // Frozen while ended, in the menu, or waiting on the exit prompt
    if !world.is_running() {
        return;
    }

    let input = if input.idle_mode {
        autopilot(world)
    } else {
        input.clone()
    };

    world.time_ticks += 1;

    // Movement from held keys
    let speed = world.settings.move_speed;
    let floor_top = world.level.floor_top();
    apply_input(&mut world.player, &input, speed, floor_top);

    // Timer callbacks
    for kind in world.timers.advance(dt) {
        match kind {
            TimerKind::SpawnCollectible => {
                spawn_collectible(world);
            }
            TimerKind::FloorCorrection => run_correction_job(world),
        }
    }

    physics.integrate(world, dt);

    let contacts = physics.contacts(world);
    let hit_hazard = dispatch_contacts(world, &contacts);

    if hit_hazard {
        end_session(world, scores);
    }
}

/// Steer under the lowest falling snowflake while staying clear of the rug racks
pub fn autopilot(world: &World) -> TickInput {
    let player = &world.player;
    let half = player.size.x / 2.0;

    // Safe corridor between the innermost left and right hazards
    let mut lo = world.level.left + half;
    let mut hi = world.level.right - half;
    for hazard in &world.hazards {
        let reach = hazard.size.x / 2.0 + half + IDLE_MARGIN;
        match hazard.band {
            Band::Left => lo = lo.max(hazard.pos.x + reach),
            Band::Right => hi = hi.min(hazard.pos.x - reach),
        }
    }

    let mut input = TickInput::default();
    if lo > hi {
        return input;
    }

    let target = world
        .collectibles
        .iter()
        .min_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|flake| flake.pos.x)
        .unwrap_or((lo + hi) / 2.0)
        .clamp(lo, hi);

    if target > player.pos.x + IDLE_DEADZONE {
        input.walk_right = true;
    } else if target < player.pos.x - IDLE_DEADZONE {
        input.walk_left = true;
    }
    input
}
