//! Physics substrate seam
//!
//! The session never integrates or detects overlaps itself; it asks a
//! [`PhysicsSubstrate`]. [`ArcadePhysics`] is a small axis-aligned
//! implementation, good enough to play a headless run.

use super::collision::Contact;
use super::state::World;
use crate::aabb_overlap;

/// Integration and contact reporting provided by the engine
pub trait PhysicsSubstrate {
    /// Advance bodies by `dt` under the world's gravity
    fn integrate(&mut self, world: &mut World, dt: f32);
    /// Report every touching pair with a possible reaction
    fn contacts(&mut self, world: &World) -> Vec<Contact>;
}

/// Gravity, border clamping and box overlaps. Not physically accurate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcadePhysics;

impl PhysicsSubstrate for ArcadePhysics {
    fn integrate(&mut self, world: &mut World, dt: f32) {
        let level = world.level;
        let gravity = world.gravity;

        // --- PLAYER ---
        let player = &mut world.player;
        player.vel += gravity * dt;
        player.pos += player.vel * dt;

        let half = player.size / 2.0;
        if player.pos.y - half.y < level.floor_top() {
            player.pos.y = level.floor_top() + half.y;
            player.vel.y = player.vel.y.max(0.0);
        }
        if player.pos.y + half.y > level.top {
            player.pos.y = level.top - half.y;
            player.vel.y = player.vel.y.min(0.0);
        }
        let min_x = level.left + half.x;
        let max_x = (level.right - half.x).max(min_x);
        player.pos.x = player.pos.x.clamp(min_x, max_x);

        // --- SNOWFLAKES ---
        // No rotation, no drag: they just fall
        for flake in &mut world.collectibles {
            flake.vel += gravity * dt;
            flake.pos += flake.vel * dt;
        }
    }

    fn contacts(&mut self, world: &World) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let player = &world.player;
        let floor_top = world.level.floor_top();

        for hazard in &world.hazards {
            if aabb_overlap(player.pos, player.size, hazard.pos, hazard.size) {
                contacts.push(Contact(player.id, hazard.id));
            }
        }

        for flake in &world.collectibles {
            if aabb_overlap(player.pos, player.size, flake.pos, flake.size) {
                contacts.push(Contact(player.id, flake.id));
            }
            if flake.bottom() <= floor_top {
                contacts.push(Contact(flake.id, world.boundaries.floor));
            }
            for hazard in &world.hazards {
                if aabb_overlap(flake.pos, flake.size, hazard.pos, hazard.size) {
                    contacts.push(Contact(flake.id, hazard.id));
                }
            }
        }

        contacts
    }
}
