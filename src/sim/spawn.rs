//! Hazard placement and snowflake spawning
//!
//! Position math is kept in small pure helpers generic over [`RandomSource`]
//! so placement can be checked under any seed.

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Band, Collectible, EntityId, Hazard, Level, SnowflakeVariant, Sprite, World};
use crate::consts::*;

/// Odd hazard indices go left, even ones right (indices start at 1)
pub fn band_for_index(index: u32) -> Band {
    if index.is_multiple_of(2) {
        Band::Right
    } else {
        Band::Left
    }
}

/// Horizontal range a hazard centre may take inside its band.
/// Never inverted: a band narrower than the hazard collapses onto the border.
pub fn hazard_band_range(level: &Level, band: Band, hazard_width: f32, band_width: f32) -> (f32, f32) {
    let half = hazard_width / 2.0;
    let min_x = level.left + half;
    let max_x = (level.right - half).max(min_x);
    match band {
        Band::Left => {
            let hi = (level.left + band_width).clamp(min_x, max_x);
            (min_x, hi)
        }
        Band::Right => {
            let lo = (level.right - band_width).clamp(min_x, max_x);
            (lo, max_x)
        }
    }
}

/// Centre of a hazard dropped into `band`
pub fn hazard_position<R: RandomSource>(
    level: &Level,
    band: Band,
    size: Vec2,
    band_width: f32,
    rng: &mut R,
) -> Vec2 {
    let (lo, hi) = hazard_band_range(level, band, size.x, band_width);
    let x = rng.real_in(lo, hi);
    // Rests on the floor line at the latest, never sinks into it
    let y = level.floor_top() + HAZARD_FLOOR_OFFSET.max(size.y / 2.0);
    Vec2::new(x, y)
}

/// Place `world.settings.hazard_count` rug racks, alternating left and right
pub fn place_hazards(world: &mut World) {
    let size = Vec2::new(HAZARD_WIDTH, HAZARD_HEIGHT);
    let band_width = world.settings.hazard_band_width;

    for index in 1..=world.settings.hazard_count {
        let band = band_for_index(index);
        let pos = hazard_position(&world.level, band, size, band_width, &mut world.rng);
        let id = world.next_entity_id();
        world.hazards.push(Hazard {
            id,
            pos,
            size,
            band,
            sprite: Sprite::RugRack,
        });
    }

    log::debug!("Placed {} hazards", world.hazards.len());
}

/// Horizontal range a snowflake centre may take (full playable width)
pub fn collectible_x_range(level: &Level, size: f32) -> (f32, f32) {
    let lo = level.left + size / 2.0;
    let hi = level.right - size / 2.0;
    if hi < lo {
        let mid = (level.left + level.right) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

/// Pick a snowflake variant uniformly
pub fn roll_variant<R: RandomSource>(rng: &mut R) -> SnowflakeVariant {
    let last = SnowflakeVariant::ALL.len() as i32 - 1;
    let idx = rng.int_in(0, last).clamp(0, last) as usize;
    SnowflakeVariant::ALL[idx]
}

/// Snowflake spawned at the top edge of the level
pub fn roll_collectible<R: RandomSource>(level: &Level, id: EntityId, rng: &mut R) -> Collectible {
    let variant = roll_variant(rng);
    let (lo, hi) = collectible_x_range(level, SNOWFLAKE_SIZE);
    let x = rng.real_in(lo, hi);
    Collectible {
        id,
        pos: Vec2::new(x, level.top - SNOWFLAKE_SIZE / 2.0),
        vel: Vec2::ZERO,
        size: Vec2::splat(SNOWFLAKE_SIZE),
        variant,
    }
}

/// Spawn one snowflake into the world. Its reactions come from the rule table,
/// so the tag is all it needs.
pub fn spawn_collectible(world: &mut World) -> EntityId {
    let id = world.next_entity_id();
    let flake = roll_collectible(&world.level, id, &mut world.rng);
    log::debug!(
        "Spawned snowflake {:?} ({:?}) at x={:.1}",
        id,
        flake.variant,
        flake.pos.x
    );
    // Ids only grow, so pushing keeps the list sorted
    world.collectibles.push(flake);
    id
}
