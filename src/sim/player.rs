//! Player controller
//!
//! Held keys become velocity commands every tick; a fixed-rate job keeps the
//! character from hovering over the floor line.

use super::state::{Player, World};
use super::tick::TickInput;

/// Apply held movement keys. Walking sets horizontal velocity outright;
/// jumping only takes while the character stands on the floor.
pub fn apply_input(player: &mut Player, input: &TickInput, speed: f32, floor_top: f32) {
    player.vel.x = match (input.walk_left, input.walk_right) {
        (false, true) => speed,
        (true, false) => -speed,
        _ => 0.0,
    };

    if input.jump && player.on_floor(floor_top) && player.vel.y <= 0.0 {
        player.vel.y = speed;
    }
}

/// One run of the floor correction job: when the player's lower edge sits
/// above the floor line, nudge it down by at most `step`. A rising player
/// (mid-jump) is left alone. Returns true if the player moved.
pub fn correct_floor_offset(player: &mut Player, floor_top: f32, step: f32) -> bool {
    if player.vel.y > 0.0 {
        return false;
    }
    let gap = player.bottom() - floor_top;
    if gap <= 0.0 {
        return false;
    }
    player.pos.y -= gap.min(step);
    true
}

/// Timer callback for the correction job
pub fn run_correction_job(world: &mut World) {
    let floor_top = world.level.floor_top();
    let step = world.settings.correction_step;
    correct_floor_offset(&mut world.player, floor_top, step);
}
