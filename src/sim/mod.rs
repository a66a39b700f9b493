//! Deterministic session module
//!
//! All gameplay orchestration lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Injected, seeded randomness only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod build;
pub mod collision;
pub mod physics;
pub mod player;
pub mod random;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

pub use build::build;
pub use collision::{CollisionEvent, Contact, Reaction, Rule, RULES, classify, dispatch};
pub use physics::{ArcadePhysics, PhysicsSubstrate};
pub use random::{RandomSource, SessionRng};
pub use session::{
    MENU_TITLE, MenuItem, MenuOutcome, answer_exit_prompt, end_session, high_score_window_closed,
    request_exit, select_menu_item,
};
pub use state::{
    Band, Boundaries, Collectible, EntityId, Hazard, Level, Player, ScoreCounter, SessionPhase,
    SnowflakeVariant, Sprite, Tag, World,
};
pub use tick::{TickInput, autopilot, tick};
pub use timer::{TimerHandle, TimerKind, Timers};
