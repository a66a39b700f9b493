//! World builder
//!
//! Tears down whatever the previous session left behind and lays out a fresh
//! one. Safe to call any number of times.

use glam::Vec2;

use super::spawn::place_hazards;
use super::state::{Boundaries, Level, Player, SessionPhase, World};
use super::timer::TimerKind;

/// (Re)build the play field and start a new run
pub fn build(world: &mut World) {
    world.settings = world.settings.clone().sanitized();

    // Cancel everything the previous session scheduled
    world.timers.clear();
    world.spawn_timer = None;
    world.correction_job = None;

    world.hazards.clear();
    world.collectibles.clear();

    // Level borders and gravity
    world.level = Level::new(world.settings.level_width, world.settings.level_height);
    world.boundaries = Boundaries {
        floor: world.next_entity_id(),
        left: world.next_entity_id(),
        right: world.next_entity_id(),
        top: world.next_entity_id(),
    };
    world.gravity = Vec2::new(0.0, world.settings.gravity.min(0.0));

    world.score.reset();
    world.final_score = None;
    world.time_ticks = 0;

    // Player at the horizontal origin, standing on the floor
    let id = world.next_entity_id();
    let mut player = Player::new(id, Vec2::ZERO);
    player.pos.y = world.level.floor_top() + player.size.y / 2.0;
    world.player = player;

    place_hazards(world);

    world.correction_job = Some(
        world
            .timers
            .start(TimerKind::FloorCorrection, world.settings.correction_interval),
    );
    world.spawn_timer = Some(
        world
            .timers
            .start(TimerKind::SpawnCollectible, world.settings.spawn_interval),
    );

    world.exit_prompt = false;
    world.phase = SessionPhase::Active;
    world.builds += 1;

    log::info!(
        "World built (run {}): {} hazards, snowflake every {:.2}s",
        world.builds,
        world.hazards.len(),
        world.settings.spawn_interval
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::spawn::spawn_collectible;
    use crate::sim::state::Tag;

    #[test]
    fn test_player_rests_on_floor_at_origin() {
        let world = World::new(1, Settings::default());
        assert_eq!(world.player.pos.x, 0.0);
        assert_eq!(world.player.bottom(), world.level.floor_top());
        assert_eq!(world.gravity, Vec2::new(0.0, -100.0));
    }

    #[test]
    fn test_rebuild_resets_score_and_entities() {
        let mut world = World::new(2, Settings::default());
        let old_player = world.player.id;
        let old_hazards: Vec<_> = world.hazards.iter().map(|h| h.id).collect();
        let flake = spawn_collectible(&mut world);
        for _ in 0..7 {
            world.score.increment();
        }
        world.phase = SessionPhase::MenuOpen;
        world.final_score = Some(7);

        build(&mut world);

        assert_eq!(world.score.value(), 0);
        assert_eq!(world.phase, SessionPhase::Active);
        assert_eq!(world.final_score, None);
        assert!(world.collectibles.is_empty());
        assert_eq!(world.hazards.len(), 2);
        // Old entities are gone for good
        assert_eq!(world.tag_of(old_player), None);
        assert_eq!(world.tag_of(flake), None);
        for id in old_hazards {
            assert_eq!(world.tag_of(id), None);
        }
        assert_eq!(world.tag_of(world.player.id), Some(Tag::Player));
    }

    #[test]
    fn test_rebuild_replaces_timers() {
        let mut world = World::new(3, Settings::default());
        let first_spawn = world.spawn_timer;
        build(&mut world);
        build(&mut world);

        assert_eq!(world.timers.count(TimerKind::SpawnCollectible), 1);
        assert_eq!(world.timers.count(TimerKind::FloorCorrection), 1);
        let first_spawn = first_spawn.expect("first build starts the spawn timer");
        assert!(!world.timers.is_running(first_spawn));
        assert_eq!(world.builds, 3);
    }

    #[test]
    fn test_rebuild_picks_up_new_settings() {
        let mut world = World::new(4, Settings::default());
        world.settings.hazard_count = 6;
        build(&mut world);
        assert_eq!(world.hazards.len(), 6);
    }
}
